//! Native/token constant-product exchange.
//!
//! One pool holds the native asset and a single ledger-tracked token.
//! Prices follow `x × y = k` with a 1% fee that stays in the pool.
//!
//! # Operation Discipline
//!
//! Every mutating operation runs in the same order:
//!
//! 1. Validate inputs and compute every new value with checked math.
//! 2. Check that the pool's ledger balances cover any payout.
//! 3. Take the inbound legs (token pull, attached native value).
//! 4. Commit reserves and shares.
//! 5. Pay the outbound legs.
//!
//! A failure in step 3 refunds the legs already taken.  A failure in step
//! 5 before anything was paid restores the committed state and refunds
//! the inbound legs.  Once a payout has gone out the operation stands: a
//! later leg the ledger refuses, like any refund it refuses, is credited
//! to the recipient as an owed balance and paid by
//! [`Exchange::claim_owed`].  Methods take `&mut self`, so no other
//! operation (including a ledger callback) can observe the pool between
//! steps.

use tracing::{error, info, warn};

use crate::adapter::{Inbound, NativeLedger, Settlement, TokenLedger};
use crate::config::ExchangeConfig;
use crate::domain::{
    Address, Amount, Deposit, Shares, SwapDirection, SwapReceipt, SwapRequest, Withdrawal,
};
use crate::error::{AmmError, Result};
use crate::ledger::{Owed, OwedBalances, Reserves, ShareLedger, ShareToken};
use crate::math::{self, CheckedArithmetic};
use crate::traits::{LiquidityPool, SwapPool};

/// A native/token liquidity pool.
///
/// Created empty; the first deposit seeds the price ratio.
///
/// # State
///
/// - `reserves`: native and token balances the pool accounts for
/// - `shares`: outstanding liquidity shares and per-holder balances
/// - `owed`: payouts and refunds a ledger refused, held for their owners
/// - `token` / `native`: the collaborating ledgers
///
/// # Example
///
/// ```rust
/// use exchange_amm::adapter::{MemoryNative, MemoryToken};
/// use exchange_amm::config::ExchangeConfig;
/// use exchange_amm::domain::{Address, Amount, SwapDirection, SwapRequest};
/// use exchange_amm::pools::Exchange;
/// use exchange_amm::traits::{LiquidityPool, SwapPool};
///
/// let pool_account = Address::from_bytes([9u8; 32]);
/// let token_address = Address::from_bytes([7u8; 32]);
/// let alice = Address::from_bytes([1u8; 32]);
///
/// let mut token = MemoryToken::new();
/// token.mint(&alice, Amount::new(10_000));
/// token.approve(&alice, &pool_account, Amount::new(10_000));
/// let mut native = MemoryNative::new();
/// native.credit(&alice, Amount::new(10_000));
///
/// let config = ExchangeConfig::with_defaults(pool_account, token_address).expect("valid config");
/// let mut pool = Exchange::new(config, token, native).expect("pool created");
///
/// pool.provide_liquidity(&alice, Amount::new(1_000), Amount::new(2_000)).expect("seeded");
/// let request = SwapRequest::new(SwapDirection::NativeToToken, Amount::new(100), Amount::new(170))
///     .expect("non-zero");
/// let receipt = pool.swap_in_for_out(&alice, request).expect("swap ok");
/// assert_eq!(receipt.amount_out(), Amount::new(180));
/// ```
#[derive(Debug, Clone)]
pub struct Exchange<T, N> {
    config: ExchangeConfig,
    reserves: Reserves,
    shares: ShareLedger,
    owed: OwedBalances,
    token: T,
    native: N,
}

impl<T: TokenLedger, N: NativeLedger> Exchange<T, N> {
    /// Creates an empty pool over the given ledgers.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if `config` is invalid.
    pub fn new(config: ExchangeConfig, token: T, native: N) -> Result<Self> {
        config.validate()?;
        info!(
            pool = %config.pool_account(),
            token = %config.token(),
            "exchange created"
        );
        Ok(Self {
            config,
            reserves: Reserves::EMPTY,
            shares: ShareLedger::new(),
            owed: OwedBalances::new(),
            token,
            native,
        })
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &ExchangeConfig {
        &self.config
    }

    /// Returns both reserves.
    #[must_use]
    pub const fn reserves(&self) -> Reserves {
        self.reserves
    }

    /// Returns the native reserve.
    #[must_use]
    pub const fn reserve_native(&self) -> Amount {
        self.reserves.native()
    }

    /// Returns the token reserve.
    #[must_use]
    pub const fn reserve_token(&self) -> Amount {
        self.reserves.token()
    }

    /// Returns the token reserve.  Alias of [`reserve_token`](Self::reserve_token).
    #[must_use]
    pub const fn get_reserve(&self) -> Amount {
        self.reserves.token()
    }

    /// Returns `true` once the first deposit has seeded the ratio.
    #[must_use]
    pub const fn is_seeded(&self) -> bool {
        !self.shares.total().is_zero()
    }

    /// Iterates share holders in address order.
    pub fn holders(&self) -> impl Iterator<Item = (&Address, &Shares)> {
        self.shares.holders()
    }

    /// Amounts held for `holder` after a ledger refused to deliver them.
    #[must_use]
    pub fn owed(&self, holder: &Address) -> Owed {
        self.owed.get(holder)
    }

    /// Sum of all owed balances.
    #[must_use]
    pub const fn total_owed(&self) -> Owed {
        self.owed.total()
    }

    /// Pays `caller` everything the pool holds for them.
    ///
    /// The token leg goes first.  A native leg the ledger still refuses
    /// stays owed; the returned [`Owed`] is what was actually paid.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ZeroAmount`] if nothing is owed to `caller`.
    /// - [`AmmError::TransferFailed`] if no leg could be paid; nothing
    ///   changes.
    pub fn claim_owed(&mut self, caller: &Address) -> Result<Owed> {
        let owed = self.owed.get(caller);
        if owed.is_zero() {
            return Err(AmmError::ZeroAmount);
        }

        let pool = self.config.pool_account();
        let mut settlement = Settlement::new(&mut self.token, &mut self.native, pool);
        settlement.ensure_outbound(owed.native, owed.token)?;

        let mut paid = Owed::NONE;
        let mut refused = None;
        match settlement.push_token(caller, owed.token) {
            Ok(()) => paid.token = owed.token,
            Err(err) => refused = Some(err),
        }
        match settlement.send_native(caller, owed.native) {
            Ok(()) => paid.native = owed.native,
            Err(err) => refused = Some(err),
        }

        if paid.is_zero() {
            let err = refused.unwrap_or(AmmError::ZeroAmount);
            warn!(caller = %caller, %err, "owed balance still refused");
            return Err(err);
        }
        self.owed.debit(caller, paid)?;
        info!(caller = %caller, %paid, remaining = %self.owed.get(caller), "owed balance claimed");
        Ok(paid)
    }

    /// Returns the token ledger.
    pub const fn token_ledger(&self) -> &T {
        &self.token
    }

    /// Returns the token ledger mutably, e.g. to mint or approve in tests.
    pub fn token_ledger_mut(&mut self) -> &mut T {
        &mut self.token
    }

    /// Returns the native ledger.
    pub const fn native_ledger(&self) -> &N {
        &self.native
    }

    /// Returns the native ledger mutably.
    pub fn native_ledger_mut(&mut self) -> &mut N {
        &mut self.native
    }

    /// Tokens paid for selling `native_sold` at the current reserves.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ZeroAmount`] if `native_sold` is zero.
    /// - [`AmmError::EmptyReserve`] if the pool is empty.
    pub fn quote_token_amount(&self, native_sold: Amount) -> Result<Amount> {
        math::get_output_amount(native_sold, self.reserves.native(), self.reserves.token())
    }

    /// Native value paid for selling `token_sold` at the current reserves.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ZeroAmount`] if `token_sold` is zero.
    /// - [`AmmError::EmptyReserve`] if the pool is empty.
    pub fn quote_native_amount(&self, token_sold: Amount) -> Result<Amount> {
        math::get_output_amount(token_sold, self.reserves.token(), self.reserves.native())
    }

    /// Returns `true` if the pool's internal invariants hold: both
    /// reserves and the share supply are all zero or all non-zero, and the
    /// supply equals the sum of holder balances.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let empty_native = self.reserves.native().is_zero();
        let empty_token = self.reserves.token().is_zero();
        let no_shares = self.shares.total().is_zero();
        empty_native == empty_token && empty_token == no_shares && self.shares.is_consistent()
    }

    /// Returns `true` if the pool's ledger balances cover its reserves
    /// plus everything owed to holders.
    #[must_use]
    pub fn is_backed(&self) -> bool {
        let pool = self.config.pool_account();
        let owed = self.owed.total();
        let covers = |balance: Amount, reserve: Amount, held: Amount| {
            reserve
                .checked_add(&held)
                .is_some_and(|needed| balance >= needed)
        };
        covers(self.native.balance_of(&pool), self.reserves.native(), owed.native)
            && covers(self.token.balance_of(&pool), self.reserves.token(), owed.token)
    }
}

/// Credits refunds a ledger refused to the accounts they came from.
fn hold_unrefunded(owed: &mut OwedBalances, legs: Vec<Inbound>) {
    for leg in legs {
        let (holder, amount) = match leg {
            Inbound::Token { owner, amount } => (owner, Owed::token(amount)),
            Inbound::Native { payer, amount } => (payer, Owed::native(amount)),
        };
        match owed.credit(&holder, amount) {
            Ok(()) => warn!(holder = %holder, %amount, "refund held as owed"),
            Err(err) => error!(holder = %holder, %amount, %err, "owed balance overflow"),
        }
    }
}

impl<T: TokenLedger, N: NativeLedger> SwapPool for Exchange<T, N> {
    fn get_price(&self, input_reserve: Amount, output_reserve: Amount) -> Result<u128> {
        math::get_price(input_reserve, output_reserve)
    }

    fn get_output_amount(
        &self,
        input_amount: Amount,
        input_reserve: Amount,
        output_reserve: Amount,
    ) -> Result<Amount> {
        math::get_output_amount(input_amount, input_reserve, output_reserve)
    }

    fn spot_price(&self, direction: SwapDirection) -> Result<u128> {
        let (reserve_in, reserve_out) = self.reserves.oriented(direction);
        math::get_price(reserve_in, reserve_out)
    }

    fn swap_in_for_out(&mut self, caller: &Address, request: SwapRequest) -> Result<SwapReceipt> {
        let direction = request.direction();
        let amount_in = request.amount_in();
        let (reserve_in, reserve_out) = self.reserves.oriented(direction);

        let amount_out = math::get_output_amount(amount_in, reserve_in, reserve_out)?;
        if amount_out < request.min_amount_out() {
            return Err(AmmError::SlippageExceeded {
                amount_out,
                min_amount_out: request.min_amount_out(),
            });
        }
        let fee = math::retained_fee(amount_in)?;
        let next = self.reserves.swapped(direction, amount_in, amount_out)?;

        let pool = self.config.pool_account();
        let mut settlement = Settlement::new(&mut self.token, &mut self.native, pool);
        match direction {
            SwapDirection::NativeToToken => settlement.ensure_outbound(Amount::ZERO, amount_out)?,
            SwapDirection::TokenToNative => settlement.ensure_outbound(amount_out, Amount::ZERO)?,
        }

        let taken = match direction {
            SwapDirection::NativeToToken => settlement.receive_native(caller, amount_in),
            SwapDirection::TokenToNative => settlement.pull_token(caller, amount_in),
        };
        if let Err(err) = taken {
            warn!(caller = %caller, %direction, %err, "swap input refused");
            hold_unrefunded(&mut self.owed, settlement.unwind());
            return Err(err);
        }

        let previous = self.reserves;
        self.reserves = next;

        let paid = match direction {
            SwapDirection::NativeToToken => settlement.push_token(caller, amount_out),
            SwapDirection::TokenToNative => settlement.send_native(caller, amount_out),
        };
        if let Err(err) = paid {
            // Nothing was paid, so the commit is undone.
            warn!(caller = %caller, %direction, %err, "swap payout refused");
            self.reserves = previous;
            hold_unrefunded(&mut self.owed, settlement.unwind());
            return Err(err);
        }

        info!(
            caller = %caller,
            %direction,
            %amount_in,
            %amount_out,
            %fee,
            "swap executed"
        );
        Ok(SwapReceipt::new(direction, amount_in, amount_out, fee))
    }
}

impl<T: TokenLedger, N: NativeLedger> LiquidityPool for Exchange<T, N> {
    fn provide_liquidity(
        &mut self,
        caller: &Address,
        amount_native: Amount,
        amount_token: Amount,
    ) -> Result<Deposit> {
        if amount_native.is_zero() || amount_token.is_zero() {
            return Err(AmmError::ZeroAmount);
        }

        let seeding = self.shares.total().is_zero();
        let (token_in, minted) = if seeding {
            // The native amount defines the share unit at seeding.
            (amount_token, Shares::new(amount_native.get()))
        } else {
            let reserve_native = self.reserves.native().get();
            let required = amount_native.scale(self.reserves.token().get(), reserve_native)?;
            if amount_token < required {
                return Err(AmmError::InsufficientTokenAmount {
                    required,
                    provided: amount_token,
                });
            }
            let minted = self.shares.total().scale(amount_native.get(), reserve_native)?;
            if minted.is_zero() {
                return Err(AmmError::InsufficientSharesMinted);
            }
            (required, minted)
        };
        let next = self.reserves.deposited(amount_native, token_in)?;

        let pool = self.config.pool_account();
        let mut settlement = Settlement::new(&mut self.token, &mut self.native, pool);
        let taken = settlement
            .pull_token(caller, token_in)
            .and_then(|()| settlement.receive_native(caller, amount_native));
        if let Err(err) = taken {
            warn!(caller = %caller, %err, "deposit refused by ledger");
            hold_unrefunded(&mut self.owed, settlement.unwind());
            return Err(err);
        }

        if let Err(err) = self.shares.mint(caller, minted) {
            hold_unrefunded(&mut self.owed, settlement.unwind());
            return Err(err);
        }
        self.reserves = next;

        info!(
            caller = %caller,
            seeding,
            %amount_native,
            amount_token = %token_in,
            shares = %minted,
            "liquidity provided"
        );
        Ok(Deposit {
            shares_minted: minted,
            amount_native,
            amount_token: token_in,
        })
    }

    fn remove_liquidity(&mut self, caller: &Address, shares: Shares) -> Result<Withdrawal> {
        if shares.is_zero() {
            return Err(AmmError::ZeroAmount);
        }
        let available = self.shares.balance(caller);
        if shares > available {
            return Err(AmmError::InsufficientShares {
                requested: shares,
                available,
            });
        }

        let total = self.shares.total().get();
        let amount_native = self.reserves.native().scale(shares.get(), total)?;
        let amount_token = self.reserves.token().scale(shares.get(), total)?;
        let next = self.reserves.withdrawn(amount_native, amount_token)?;

        let pool = self.config.pool_account();
        let mut settlement = Settlement::new(&mut self.token, &mut self.native, pool);
        settlement.ensure_outbound(amount_native, amount_token)?;

        let previous = self.reserves;
        self.shares.burn(caller, shares)?;
        self.reserves = next;

        if let Err(err) = settlement.push_token(caller, amount_token) {
            // Nothing was paid, so the commit is undone.
            warn!(caller = %caller, %err, "withdrawal payout refused");
            self.reserves = previous;
            if let Err(restore) = self.shares.mint(caller, shares) {
                error!(caller = %caller, %restore, "share restore failed");
            }
            return Err(err);
        }

        // The token leg is paid; from here the withdrawal stands.
        let mut native_owed = Amount::ZERO;
        if let Err(err) = settlement.send_native(caller, amount_native) {
            match self.owed.credit(caller, Owed::native(amount_native)) {
                Ok(()) => {
                    warn!(caller = %caller, %amount_native, %err, "native payout held as owed");
                    native_owed = amount_native;
                }
                // Owed value sits inside the pool balance, so this cannot
                // overflow while the pool is backed.
                Err(credit) => {
                    error!(caller = %caller, %amount_native, %credit, "owed balance overflow");
                    return Err(credit);
                }
            }
        }

        info!(
            caller = %caller,
            shares = %shares,
            %amount_native,
            %amount_token,
            %native_owed,
            "liquidity removed"
        );
        Ok(Withdrawal {
            shares_burned: shares,
            amount_native,
            amount_token,
            native_owed,
        })
    }

    fn total_shares(&self) -> Shares {
        self.shares.total()
    }

    fn share_balance(&self, holder: &Address) -> Shares {
        self.shares.balance(holder)
    }
}

impl<T: TokenLedger, N: NativeLedger> ShareToken for Exchange<T, N> {
    fn name(&self) -> &str {
        self.config.share_name()
    }

    fn symbol(&self) -> &str {
        self.config.share_symbol()
    }

    fn total_supply(&self) -> Shares {
        self.shares.total()
    }

    fn balance_of(&self, holder: &Address) -> Shares {
        self.shares.balance(holder)
    }

    fn transfer(&mut self, from: &Address, to: &Address, amount: Shares) -> Result<()> {
        if amount.is_zero() {
            return Err(AmmError::ZeroAmount);
        }
        self.shares.move_shares(from, to, amount)?;
        info!(from = %from, to = %to, shares = %amount, "shares transferred");
        Ok(())
    }
}
