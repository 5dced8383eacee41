use anchor_lang::prelude::*;

use crate::error::{ ErrorCode, PoolResult };
use crate::instructions::context::Invocation;
use crate::controller::interest::update_reserve_interest;
use crate::state::events::{ AdminAction, AdminRecord, UpgradeRecord };
use crate::state::pool::Pool;
use crate::state::reserve::{ AssetId, InterestRateParams };
use crate::state::state::{ validate_backstop_take_rate, PoolStatus, State };
use crate::validate;

fn emit_admin_record(pool: &Pool, ctx: &Invocation, action: AdminAction) {
	emit!(AdminRecord {
		ts: ctx.now,
		admin: pool.state.admin,
		action,
		pool_status: pool.state.pool_status,
	});
}

pub fn handle_initialize(
	admin: &Pubkey,
	backstop_threshold: u128,
	backstop_take_rate: u32,
	now: i64
) -> PoolResult<Pool> {
	validate_backstop_take_rate(backstop_take_rate)?;

	let pool = Pool::new(State::new(*admin, backstop_threshold, backstop_take_rate));

	emit!(AdminRecord {
		ts: now,
		admin: *admin,
		action: AdminAction::Initialize,
		pool_status: pool.state.pool_status,
	});

	Ok(pool)
}

pub fn handle_set_admin(
	pool: &mut Pool,
	ctx: &Invocation,
	caller: &Pubkey,
	new_admin: &Pubkey
) -> PoolResult {
	pool.state.validate_admin(caller)?;

	msg!("admin: {} -> {}", pool.state.admin, new_admin);
	pool.state.admin = *new_admin;

	emit_admin_record(pool, ctx, AdminAction::SetAdmin);
	Ok(())
}

pub fn handle_set_collateral_factor(
	pool: &mut Pool,
	ctx: &Invocation,
	caller: &Pubkey,
	rwa_token: &Pubkey,
	collateral_factor: u32
) -> PoolResult {
	pool.state.validate_admin(caller)?;

	msg!(
		"collateral factor {}: {} -> {}",
		rwa_token,
		pool.get_collateral_factor(rwa_token),
		collateral_factor
	);
	pool.set_collateral_factor(rwa_token, collateral_factor)?;

	emit_admin_record(pool, ctx, AdminAction::SetCollateralFactor);
	Ok(())
}

/// Creates the reserve with these params if it does not exist yet. An
/// existing reserve accrues under its old curve before the switch.
pub fn handle_set_interest_rate_params(
	pool: &mut Pool,
	ctx: &Invocation,
	caller: &Pubkey,
	asset: &AssetId,
	interest_rate_params: InterestRateParams
) -> PoolResult {
	pool.state.validate_admin(caller)?;
	interest_rate_params.validate()?;

	if pool.reserves.get_ref(asset).is_ok() {
		update_reserve_interest(pool, asset, ctx.now)?;
	}

	let reserve = pool.reserves.get_or_create_mut(asset, ctx.now);
	msg!(
		"interest rate params {}: {:?} -> {:?}",
		asset,
		reserve.interest_rate_params,
		interest_rate_params
	);
	reserve.interest_rate_params = interest_rate_params;

	emit_admin_record(pool, ctx, AdminAction::SetInterestRateParams);
	Ok(())
}

pub fn handle_set_pool_state(
	pool: &mut Pool,
	ctx: &Invocation,
	caller: &Pubkey,
	pool_status: PoolStatus
) -> PoolResult {
	pool.state.validate_admin(caller)?;

	if pool_status == PoolStatus::Active {
		validate!(
			pool.backstop.total >= pool.state.backstop_threshold,
			ErrorCode::BackstopThresholdNotMet,
			"backstop total {} below threshold {}",
			pool.backstop.total,
			pool.state.backstop_threshold
		)?;
	}

	msg!("pool status: {:?} -> {:?}", pool.state.pool_status, pool_status);
	pool.state.pool_status = pool_status;

	emit_admin_record(pool, ctx, AdminAction::SetPoolState);
	Ok(())
}

pub fn handle_set_backstop_threshold(
	pool: &mut Pool,
	ctx: &Invocation,
	caller: &Pubkey,
	backstop_threshold: u128
) -> PoolResult {
	pool.state.validate_admin(caller)?;

	msg!("backstop threshold: {} -> {}", pool.state.backstop_threshold, backstop_threshold);
	pool.state.backstop_threshold = backstop_threshold;

	emit_admin_record(pool, ctx, AdminAction::SetBackstopThreshold);
	Ok(())
}

/// Every reserve accrues at the old take rate up to now
pub fn handle_set_backstop_take_rate(
	pool: &mut Pool,
	ctx: &Invocation,
	caller: &Pubkey,
	backstop_take_rate: u32
) -> PoolResult {
	pool.state.validate_admin(caller)?;
	validate_backstop_take_rate(backstop_take_rate)?;

	let assets: Vec<AssetId> = pool.reserves.0.keys().copied().collect();
	for asset in assets.iter() {
		update_reserve_interest(pool, asset, ctx.now)?;
	}

	msg!("backstop take rate: {} -> {}", pool.state.backstop_take_rate, backstop_take_rate);
	pool.state.backstop_take_rate = backstop_take_rate;

	emit_admin_record(pool, ctx, AdminAction::SetBackstopTakeRate);
	Ok(())
}

pub fn handle_set_token_contract(
	pool: &mut Pool,
	ctx: &Invocation,
	caller: &Pubkey,
	asset: &AssetId,
	token_contract: &Pubkey
) -> PoolResult {
	pool.state.validate_admin(caller)?;

	let reserve = pool.reserves.get_or_create_mut(asset, ctx.now);
	msg!("token contract {}: {:?} -> {}", asset, reserve.token_contract, token_contract);
	reserve.token_contract = Some(*token_contract);

	emit_admin_record(pool, ctx, AdminAction::SetTokenContract);
	Ok(())
}

pub fn handle_set_backstop_token(
	pool: &mut Pool,
	ctx: &Invocation,
	caller: &Pubkey,
	backstop_token: &Pubkey
) -> PoolResult {
	pool.state.validate_admin(caller)?;

	msg!("backstop token: {:?} -> {}", pool.state.backstop_token, backstop_token);
	pool.state.backstop_token = Some(*backstop_token);

	emit_admin_record(pool, ctx, AdminAction::SetBackstopToken);
	Ok(())
}

/// Records the hash of the new code. Swapping the code itself is up to the host.
pub fn handle_upgrade(
	pool: &mut Pool,
	ctx: &Invocation,
	caller: &Pubkey,
	code_hash: [u8; 32]
) -> PoolResult {
	pool.state.validate_admin(caller)?;

	pool.state.code_hash = code_hash;

	emit!(UpgradeRecord {
		ts: ctx.now,
		admin: *caller,
		code_hash,
	});
	emit_admin_record(pool, ctx, AdminAction::Upgrade);
	Ok(())
}
