use std::collections::BTreeMap;

use anchor_lang::prelude::*;

use crate::error::{ ErrorCode, PoolResult };
use crate::math::safe_math::SafeMath;
use crate::state::reserve::AssetId;
use crate::validate;


/// A single account's positions. Entries are created lazily and zeroed,
/// never removed.
#[derive(
	Clone,
	Debug,
	Default,
	PartialEq,
	Eq,
	AnchorSerialize,
	AnchorDeserialize
)]
pub struct UserPositions {
	pub b_tokens: BTreeMap<AssetId, u128>,
	pub d_tokens: BTreeMap<AssetId, u128>,
	/// raw RWA token amounts, not rate adjusted
	pub collateral: BTreeMap<Pubkey, u128>,
	/// the only asset this account may owe while debt is outstanding
	pub debt_asset: Option<AssetId>,
}

impl UserPositions {
	pub fn get_b_token_balance(&self, asset: &AssetId) -> u128 {
		self.b_tokens.get(asset).copied().unwrap_or(0)
	}

	pub fn get_d_token_balance(&self, asset: &AssetId) -> u128 {
		self.d_tokens.get(asset).copied().unwrap_or(0)
	}

	pub fn get_collateral(&self, rwa_token: &Pubkey) -> u128 {
		self.collateral.get(rwa_token).copied().unwrap_or(0)
	}

	pub fn has_collateral(&self) -> bool {
		self.collateral.values().any(|amount| *amount > 0)
	}

	/// The debt asset and its dToken balance, if any debt is outstanding
	pub fn get_debt(&self) -> Option<(AssetId, u128)> {
		let asset = self.debt_asset?;
		let d_tokens = self.get_d_token_balance(&asset);
		if d_tokens == 0 {
			None
		} else {
			Some((asset, d_tokens))
		}
	}

	pub fn increase_b_tokens(&mut self, asset: &AssetId, delta: u128) -> PoolResult {
		let balance = self.b_tokens.entry(*asset).or_insert(0);
		*balance = balance.safe_add(delta)?;
		Ok(())
	}

	pub fn decrease_b_tokens(&mut self, asset: &AssetId, delta: u128) -> PoolResult {
		let balance = self.b_tokens.entry(*asset).or_insert(0);
		validate!(
			*balance >= delta,
			ErrorCode::InsufficientBTokenBalance,
			"{} bToken balance {} < {}",
			asset,
			balance,
			delta
		)?;
		*balance = balance.safe_sub(delta)?;
		Ok(())
	}

	/// Mints dTokens, binding the account to `asset` as its debt asset
	pub fn increase_d_tokens(&mut self, asset: &AssetId, delta: u128) -> PoolResult {
		if let Some((debt_asset, _)) = self.get_debt() {
			validate!(
				debt_asset == *asset,
				ErrorCode::CannotSwitchDebtAsset,
				"account owes {}, cannot borrow {}",
				debt_asset,
				asset
			)?;
		}

		let balance = self.d_tokens.entry(*asset).or_insert(0);
		*balance = balance.safe_add(delta)?;
		self.debt_asset = Some(*asset);
		Ok(())
	}

	/// Burns dTokens, releasing the debt asset once nothing is owed
	pub fn decrease_d_tokens(&mut self, asset: &AssetId, delta: u128) -> PoolResult {
		let balance = self.d_tokens.entry(*asset).or_insert(0);
		validate!(
			*balance >= delta,
			ErrorCode::InsufficientDTokenBalance,
			"{} dToken balance {} < {}",
			asset,
			balance,
			delta
		)?;
		*balance = balance.safe_sub(delta)?;

		if *balance == 0 && self.debt_asset == Some(*asset) {
			self.debt_asset = None;
		}
		Ok(())
	}

	pub fn add_collateral(&mut self, rwa_token: &Pubkey, amount: u128) -> PoolResult {
		let balance = self.collateral.entry(*rwa_token).or_insert(0);
		*balance = balance.safe_add(amount)?;
		Ok(())
	}

	pub fn remove_collateral(&mut self, rwa_token: &Pubkey, amount: u128) -> PoolResult {
		let balance = match self.collateral.get_mut(rwa_token) {
			Some(balance) if *balance > 0 => balance,
			_ => {
				msg!("No {} collateral posted", rwa_token);
				return Err(ErrorCode::CollateralNotFound);
			}
		};

		validate!(
			*balance >= amount,
			ErrorCode::CollateralAmountTooLarge,
			"{} collateral {} < {}",
			rwa_token,
			balance,
			amount
		)?;
		*balance = balance.safe_sub(amount)?;
		Ok(())
	}
}

#[derive(
	Clone,
	Debug,
	Default,
	PartialEq,
	Eq,
	AnchorSerialize,
	AnchorDeserialize
)]
pub struct UserMap(pub BTreeMap<Pubkey, UserPositions>);

impl UserMap {
	pub fn get(&self, user: &Pubkey) -> Option<&UserPositions> {
		self.0.get(user)
	}

	/// Returns the account's positions, creating an empty entry on first use
	pub fn get_or_create_mut(&mut self, user: &Pubkey) -> &mut UserPositions {
		self.0.entry(*user).or_default()
	}
}
