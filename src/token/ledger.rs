//! Supply and balance bookkeeping for token classes.

use crate::domain::{Name, Quantity, SymbolCode};
use crate::error::{PoolError, Result};
use crate::store::Table;

/// Supply record of one token class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyStats {
    /// Outstanding units.
    pub supply: Quantity,
    /// Cap on `supply`; its symbol defines the class.
    pub max_supply: Quantity,
    /// Account allowed to issue and retire.
    pub issuer: Name,
}

/// Supplies and balances of every token class one contract manages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenLedger {
    stats: Table<SymbolCode, CurrencyStats>,
    accounts: Table<(Name, SymbolCode), Quantity>,
}

impl TokenLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a new token class with zero supply.
    ///
    /// # Errors
    ///
    /// - [`PoolError::InvalidQuantity`] if `max_supply` is invalid or not
    ///   positive.
    /// - [`PoolError::InvalidSymbol`] if the class already exists.
    pub fn create(&mut self, issuer: Name, max_supply: Quantity) -> Result<()> {
        Self::check_max_supply(&max_supply)?;
        let code = max_supply.code().clone();
        if self.stats.contains(&code) {
            return Err(PoolError::InvalidSymbol(format!("{code} already exists")));
        }
        self.stats.emplace(code, Self::fresh_stats(issuer, max_supply));
        Ok(())
    }

    /// Declares a class, or resets an existing one to zero supply under
    /// the new issuer and cap.  Balances are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidQuantity`] if `max_supply` is invalid
    /// or not positive.
    pub fn reset_class(&mut self, issuer: Name, max_supply: Quantity) -> Result<()> {
        Self::check_max_supply(&max_supply)?;
        let code = max_supply.code().clone();
        self.stats.upsert(code, Self::fresh_stats(issuer, max_supply));
        Ok(())
    }

    /// Drops a class's supply record, returning it.
    pub fn remove_class(&mut self, code: &SymbolCode) -> Option<CurrencyStats> {
        self.stats.erase(code)
    }

    /// Supply record of a class.
    #[must_use]
    pub fn stats(&self, code: &SymbolCode) -> Option<&CurrencyStats> {
        self.stats.find(code)
    }

    /// Balance of `owner` in class `code`.
    #[must_use]
    pub fn balance(&self, owner: &Name, code: &SymbolCode) -> Option<&Quantity> {
        self.accounts.find(&(owner.clone(), code.clone()))
    }

    /// Validates a quantity against its class and returns the class.
    ///
    /// # Errors
    ///
    /// - [`PoolError::UnknownToken`] if the class does not exist.
    /// - [`PoolError::InvalidQuantity`] if the quantity is invalid,
    ///   negative, or zero while `allow_zero` is false.
    /// - [`PoolError::SymbolMismatch`] if the precision differs.
    pub fn check_quantity(&self, quantity: &Quantity, allow_zero: bool) -> Result<&CurrencyStats> {
        let stats = self
            .stats
            .find(quantity.code())
            .ok_or_else(|| PoolError::UnknownToken(quantity.code().to_string()))?;
        if !quantity.is_valid() {
            return Err(PoolError::InvalidQuantity("invalid quantity"));
        }
        if quantity.amount() < 0 || (!allow_zero && quantity.amount() == 0) {
            return Err(PoolError::InvalidQuantity("quantity must be positive"));
        }
        if quantity.symbol() != stats.supply.symbol() {
            return Err(PoolError::SymbolMismatch("symbol precision mismatch"));
        }
        Ok(stats)
    }

    /// Mints `quantity` to the class issuer.
    ///
    /// # Errors
    ///
    /// Fails as [`check_quantity`](Self::check_quantity) does for a
    /// positive quantity, or with [`PoolError::InvalidQuantity`] if the
    /// mint would exceed the class cap.
    pub fn mint(&mut self, quantity: &Quantity) -> Result<()> {
        let stats = self.check_quantity(quantity, false)?;
        let supply = stats.supply.checked_add(quantity)?;
        if supply.amount() > stats.max_supply.amount() {
            return Err(PoolError::InvalidQuantity("quantity exceeds available supply"));
        }
        let issuer = stats.issuer.clone();
        self.stats
            .modify(quantity.code(), |s| s.supply = supply)
            .ok_or_else(|| PoolError::UnknownToken(quantity.code().to_string()))?;
        self.add_balance(&issuer, quantity)
    }

    /// Burns `quantity` from the class issuer's balance.
    ///
    /// # Errors
    ///
    /// Fails as [`check_quantity`](Self::check_quantity) does for a
    /// positive quantity, or with [`PoolError::InsufficientBalance`] if the
    /// issuer holds less.
    pub fn burn(&mut self, quantity: &Quantity) -> Result<()> {
        let stats = self.check_quantity(quantity, false)?;
        let supply = stats.supply.checked_sub(quantity)?;
        let issuer = stats.issuer.clone();
        self.sub_balance(&issuer, quantity)?;
        self.stats
            .modify(quantity.code(), |s| s.supply = supply)
            .ok_or_else(|| PoolError::UnknownToken(quantity.code().to_string()))
    }

    /// Debits `owner`.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InsufficientBalance`] if `owner` holds less than
    /// `value` (or nothing at all).
    pub fn sub_balance(&mut self, owner: &Name, value: &Quantity) -> Result<()> {
        let key = (owner.clone(), value.code().clone());
        let overdrawn = || PoolError::InsufficientBalance {
            owner: owner.to_string(),
            symbol: value.code().to_string(),
        };
        let current = self.accounts.find(&key).ok_or_else(overdrawn)?;
        if current.amount() < value.amount() {
            return Err(overdrawn());
        }
        let next = current.checked_sub(value)?;
        self.accounts.upsert(key, next);
        Ok(())
    }

    /// Credits `owner`, opening the balance if needed.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::Overflow`] or [`PoolError::SymbolMismatch`] from
    /// the checked addition.
    pub fn add_balance(&mut self, owner: &Name, value: &Quantity) -> Result<()> {
        let key = (owner.clone(), value.code().clone());
        let next = match self.accounts.find(&key) {
            Some(current) => current.checked_add(value)?,
            None => value.clone(),
        };
        self.accounts.upsert(key, next);
        Ok(())
    }

    /// Moves `value` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Propagates [`sub_balance`](Self::sub_balance) and
    /// [`add_balance`](Self::add_balance) failures.
    pub fn move_balance(&mut self, from: &Name, to: &Name, value: &Quantity) -> Result<()> {
        self.sub_balance(from, value)?;
        self.add_balance(to, value)
    }

    fn check_max_supply(max_supply: &Quantity) -> Result<()> {
        if !max_supply.is_valid() || max_supply.amount() <= 0 {
            return Err(PoolError::InvalidQuantity("max supply must be positive"));
        }
        Ok(())
    }

    fn fresh_stats(issuer: Name, max_supply: Quantity) -> CurrencyStats {
        CurrencyStats {
            supply: Quantity::zero(max_supply.symbol().clone()),
            max_supply,
            issuer,
        }
    }
}
