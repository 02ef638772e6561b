//! Property-based tests using `proptest` for exchange invariants.
//!
//! 1. **Swap reversibility**: a round trip returns no more than was sold.
//! 2. **Product growth**: `reserve_native × reserve_token` strictly grows
//!    with every swap, and no output drains a reserve.
//! 3. **Fee monotonicity**: larger input gives larger or equal output and fee.
//! 4. **Liquidity conservation**: seeding mints the native amount, deposits
//!    take the ratio amount of tokens, withdrawals pay pro rata, and a
//!    deposit then full withdrawal returns no more than was deposited.
//! 5. **Price movement direction**: selling an asset makes it cheaper.
//! 6. **Value conservation**: ledger totals are constant and the pool
//!    stays backed across arbitrary operation sequences.
//! 7. **Atomic failure**: a refused operation leaves every balance intact.
//! 8. **Paid legs stand**: a withdrawal whose native leg is refused after
//!    the tokens went out keeps its burn, holds the native amount as owed,
//!    and leaves the pool backed for every other holder.

use proptest::prelude::*;

use crate::adapter::{MemoryNative, MemoryToken, NativeLedger, TokenLedger};
use crate::config::ExchangeConfig;
use crate::domain::{Address, Amount, Shares, SwapDirection, SwapRequest};
use crate::math;
use crate::pools::Exchange;
use crate::traits::{LiquidityPool, SwapPool};

type MemoryExchange = Exchange<MemoryToken, MemoryNative>;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

const FUNDING: u128 = 1_000_000_000_000;

fn pool_account() -> Address {
    Address::from_bytes([9u8; 32])
}

fn alice() -> Address {
    Address::from_bytes([1u8; 32])
}

fn bob() -> Address {
    Address::from_bytes([2u8; 32])
}

fn make_pool() -> MemoryExchange {
    let mut token = MemoryToken::new();
    let mut native = MemoryNative::new();
    for who in [alice(), bob()] {
        token.mint(&who, Amount::new(FUNDING));
        token.approve(&who, &pool_account(), Amount::MAX);
        native.credit(&who, Amount::new(FUNDING));
    }
    let Ok(config) = ExchangeConfig::with_defaults(pool_account(), Address::from_bytes([7u8; 32]))
    else {
        panic!("valid config");
    };
    let Ok(pool) = Exchange::new(config, token, native) else {
        panic!("valid pool");
    };
    pool
}

fn seeded(native: u128, token: u128) -> MemoryExchange {
    let mut pool = make_pool();
    let Ok(_) = pool.provide_liquidity(&alice(), Amount::new(native), Amount::new(token)) else {
        panic!("seeding failed");
    };
    pool
}

fn request(direction: SwapDirection, amount_in: u128) -> SwapRequest {
    let Ok(req) = SwapRequest::new(direction, Amount::new(amount_in), Amount::ZERO) else {
        panic!("non-zero request");
    };
    req
}

/// Sum of native balances across every account the tests touch.
fn native_total(pool: &MemoryExchange) -> u128 {
    [alice(), bob(), pool_account()]
        .iter()
        .map(|who| pool.native_ledger().balance_of(who).get())
        .sum()
}

/// Sum of token balances across every account the tests touch.
fn token_total(pool: &MemoryExchange) -> u128 {
    [alice(), bob(), pool_account()]
        .iter()
        .map(|who| pool.token_ledger().balance_of(who).get())
        .sum()
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Reserve values in range [10_000, 10_000_000] to avoid extremes.
fn reserve_strategy() -> impl Strategy<Value = u128> {
    10_000u128..=10_000_000u128
}

fn direction_strategy() -> impl Strategy<Value = SwapDirection> {
    prop_oneof![
        Just(SwapDirection::NativeToToken),
        Just(SwapDirection::TokenToNative),
    ]
}

/// One step of a random session against a seeded pool.
#[derive(Debug, Clone)]
enum Op {
    Swap(bool, SwapDirection, u128),
    Provide(bool, u128, u128),
    Remove(bool, u128),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (any::<bool>(), direction_strategy(), 1u128..=1_000_000u128)
            .prop_map(|(who, d, a)| Op::Swap(who, d, a)),
        (any::<bool>(), 1u128..=1_000_000u128, 1u128..=4_000_000u128)
            .prop_map(|(who, n, t)| Op::Provide(who, n, t)),
        (any::<bool>(), 1u128..=1_000_000u128).prop_map(|(who, s)| Op::Remove(who, s)),
    ]
}

fn actor(first: bool) -> Address {
    if first {
        alice()
    } else {
        bob()
    }
}

// ---------------------------------------------------------------------------
// Property 1: Swap Reversibility
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_swap_reversibility(
        rn in reserve_strategy(),
        rt in reserve_strategy(),
        direction in direction_strategy(),
    ) {
        let mut pool = seeded(rn, rt);
        let (reserve_in, _) = pool.reserves().oriented(direction);
        let swap_in = (reserve_in.get() / 1_000).max(1);

        let Ok(there) = pool.swap_in_for_out(&bob(), request(direction, swap_in)) else {
            return Ok(());
        };
        let received = there.amount_out().get();
        if received == 0 { return Ok(()); }

        let Ok(back) = pool.swap_in_for_out(&bob(), request(direction.reversed(), received)) else {
            return Ok(());
        };
        prop_assert!(
            back.amount_out().get() <= swap_in,
            "round-trip should lose value: final={} > original={}",
            back.amount_out().get(), swap_in
        );
    }
}

// ---------------------------------------------------------------------------
// Property 2: Product Growth
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_product_grows_with_every_swap(
        rn in reserve_strategy(),
        rt in reserve_strategy(),
        swaps in prop::collection::vec((direction_strategy(), 1u128..=1_000_000u128), 1..8),
    ) {
        let mut pool = seeded(rn, rt);
        let mut k = pool.reserves().product();
        for (direction, amount) in swaps {
            if pool.swap_in_for_out(&bob(), request(direction, amount)).is_err() {
                continue;
            }
            let next = pool.reserves().product();
            prop_assert!(next > k, "product did not grow after {} swap of {}", direction, amount);
            k = next;
        }
    }

    #[test]
    fn prop_output_below_reserve(
        input in 1u128..=u128::MAX / 2,
        reserve_in in 1u128..=u128::MAX / 2,
        reserve_out in 1u128..=u128::MAX / 2,
    ) {
        let Ok(out) = math::get_output_amount(
            Amount::new(input),
            Amount::new(reserve_in),
            Amount::new(reserve_out),
        ) else {
            return Ok(());
        };
        prop_assert!(out.get() < reserve_out);
    }
}

// ---------------------------------------------------------------------------
// Property 3: Fee Monotonicity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_fee_monotonicity(
        rn in reserve_strategy(),
        rt in reserve_strategy(),
        small in 1u128..=1_000_000u128,
        extra in 0u128..=1_000_000u128,
    ) {
        let large = small + extra;
        let reserve_native = Amount::new(rn);
        let reserve_token = Amount::new(rt);

        let Ok(out_small) = math::get_output_amount(Amount::new(small), reserve_native, reserve_token) else {
            return Ok(());
        };
        let Ok(out_large) = math::get_output_amount(Amount::new(large), reserve_native, reserve_token) else {
            return Ok(());
        };
        prop_assert!(out_large >= out_small);

        let Ok(fee_small) = math::retained_fee(Amount::new(small)) else {
            return Ok(());
        };
        let Ok(fee_large) = math::retained_fee(Amount::new(large)) else {
            return Ok(());
        };
        prop_assert!(fee_large >= fee_small);
    }
}

// ---------------------------------------------------------------------------
// Property 4: Liquidity Conservation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_seed_mints_native_amount(
        rn in reserve_strategy(),
        rt in reserve_strategy(),
    ) {
        let mut pool = make_pool();
        let Ok(deposit) = pool.provide_liquidity(&alice(), Amount::new(rn), Amount::new(rt)) else {
            return Ok(());
        };
        prop_assert_eq!(deposit.shares_minted, Shares::new(rn));
        prop_assert_eq!(pool.total_shares(), Shares::new(rn));
    }

    #[test]
    fn prop_deposit_pulls_ratio_and_mints_proportionally(
        rn in reserve_strategy(),
        rt in reserve_strategy(),
        add in 1u128..=1_000_000u128,
    ) {
        let mut pool = seeded(rn, rt);
        let total = pool.total_shares().get();
        let required = add * rt / rn;
        let offered = required + add;
        let bob_before = pool.token_ledger().balance_of(&bob()).get();

        let Ok(deposit) = pool.provide_liquidity(&bob(), Amount::new(add), Amount::new(offered)) else {
            return Ok(());
        };
        prop_assert_eq!(deposit.amount_token.get(), required);
        prop_assert_eq!(deposit.shares_minted.get(), total * add / rn);
        prop_assert_eq!(pool.token_ledger().balance_of(&bob()).get(), bob_before - required);
        prop_assert_eq!(pool.reserves().token().get(), rt + required);
    }

    #[test]
    fn prop_deposit_then_withdraw_loses_nothing_to_caller(
        rn in reserve_strategy(),
        rt in reserve_strategy(),
        add in 1u128..=1_000_000u128,
    ) {
        let mut pool = seeded(rn, rt);
        let Ok(deposit) = pool.provide_liquidity(&bob(), Amount::new(add), Amount::new(FUNDING / 2)) else {
            return Ok(());
        };
        let Ok(withdrawal) = pool.remove_liquidity(&bob(), deposit.shares_minted) else {
            return Ok(());
        };
        prop_assert!(withdrawal.amount_native <= deposit.amount_native);
        prop_assert!(withdrawal.amount_token <= deposit.amount_token);
        prop_assert!(pool.is_consistent());
    }

    #[test]
    fn prop_withdrawal_is_proportional(
        rn in reserve_strategy(),
        rt in reserve_strategy(),
        part in 1u128..=10_000u128,
    ) {
        let mut pool = seeded(rn, rt);
        let total = pool.total_shares().get();
        let Ok(withdrawal) = pool.remove_liquidity(&alice(), Shares::new(part)) else {
            return Ok(());
        };
        prop_assert_eq!(withdrawal.amount_native.get(), rn * part / total);
        prop_assert_eq!(withdrawal.amount_token.get(), rt * part / total);
    }
}

// ---------------------------------------------------------------------------
// Property 5: Price Movement Direction
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_selling_makes_asset_cheaper(
        rn in reserve_strategy(),
        rt in reserve_strategy(),
        direction in direction_strategy(),
        amount in 1u128..=1_000_000u128,
    ) {
        let mut pool = seeded(rn, rt);
        let Ok(before) = pool.spot_price(direction) else {
            return Ok(());
        };
        if pool.swap_in_for_out(&bob(), request(direction, amount)).is_err() {
            return Ok(());
        }
        let Ok(after) = pool.spot_price(direction) else {
            return Ok(());
        };
        prop_assert!(after >= before, "price moved the wrong way: {} -> {}", before, after);
    }
}

// ---------------------------------------------------------------------------
// Property 6: Value Conservation
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_value_conserved_across_sessions(
        rn in reserve_strategy(),
        rt in reserve_strategy(),
        ops in prop::collection::vec(op_strategy(), 1..16),
    ) {
        let mut pool = seeded(rn, rt);
        let native_before = native_total(&pool);
        let token_before = token_total(&pool);

        for op in ops {
            let _ = match op {
                Op::Swap(who, direction, amount) => pool
                    .swap_in_for_out(&actor(who), request(direction, amount))
                    .map(|_| ()),
                Op::Provide(who, native, token) => pool
                    .provide_liquidity(&actor(who), Amount::new(native), Amount::new(token))
                    .map(|_| ()),
                Op::Remove(who, shares) => pool
                    .remove_liquidity(&actor(who), Shares::new(shares))
                    .map(|_| ()),
            };
            prop_assert!(pool.is_consistent());
            prop_assert!(pool.is_backed());
        }

        prop_assert_eq!(native_total(&pool), native_before);
        prop_assert_eq!(token_total(&pool), token_before);
    }
}

// ---------------------------------------------------------------------------
// Property 7: Atomic Failure
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_refused_swap_changes_nothing(
        rn in reserve_strategy(),
        rt in reserve_strategy(),
        direction in direction_strategy(),
        amount in 1u128..=1_000_000u128,
    ) {
        let mut pool = seeded(rn, rt);
        match direction {
            SwapDirection::NativeToToken => pool.token_ledger_mut().block(&bob()),
            SwapDirection::TokenToNative => pool.native_ledger_mut().block(&bob()),
        }
        let reserves = pool.reserves();
        let bob_native = pool.native_ledger().balance_of(&bob());
        let bob_token = pool.token_ledger().balance_of(&bob());

        let result = pool.swap_in_for_out(&bob(), request(direction, amount));
        // A zero payout skips the blocked leg entirely.
        let Err(_) = result else {
            return Ok(());
        };
        prop_assert_eq!(pool.reserves(), reserves);
        prop_assert_eq!(pool.native_ledger().balance_of(&bob()), bob_native);
        prop_assert_eq!(pool.token_ledger().balance_of(&bob()), bob_token);
    }
}

// ---------------------------------------------------------------------------
// Property 8: Paid Legs Stand
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_refused_native_leg_is_owed_not_restored(
        rn in reserve_strategy(),
        rt in reserve_strategy(),
        deposit in 1_000u128..=1_000_000u128,
        percent in 1u128..=100u128,
    ) {
        let mut pool = seeded(rn, rt);
        let Ok(_) = pool.provide_liquidity(&bob(), Amount::new(deposit), Amount::new(FUNDING))
        else {
            return Err(TestCaseError::reject("deposit mints nothing"));
        };
        let native_before = native_total(&pool);
        let token_before = token_total(&pool);
        let bob_native = pool.native_ledger().balance_of(&bob());
        let held = pool.share_balance(&bob()).get();
        let burn = Shares::new((held * percent / 100).max(1));

        pool.native_ledger_mut().block(&bob());
        let Ok(withdrawal) = pool.remove_liquidity(&bob(), burn) else {
            return Err(TestCaseError::fail("withdrawal must stand"));
        };
        prop_assert_eq!(withdrawal.native_owed, withdrawal.amount_native);
        prop_assert_eq!(pool.owed(&bob()).native, withdrawal.amount_native);
        prop_assert_eq!(pool.share_balance(&bob()).get(), held - burn.get());
        prop_assert_eq!(pool.native_ledger().balance_of(&bob()), bob_native);
        prop_assert!(pool.is_consistent());
        prop_assert!(pool.is_backed());

        // The remaining holders can still leave in full.
        let alice_shares = pool.share_balance(&alice());
        prop_assert!(pool.remove_liquidity(&alice(), alice_shares).is_ok());
        prop_assert!(pool.is_backed());

        pool.native_ledger_mut().unblock(&bob());
        if !withdrawal.native_owed.is_zero() {
            let Ok(claimed) = pool.claim_owed(&bob()) else {
                return Err(TestCaseError::fail("claim refused"));
            };
            prop_assert_eq!(claimed.native, withdrawal.amount_native);
        }
        prop_assert!(pool.total_owed().is_zero());
        prop_assert_eq!(
            pool.native_ledger().balance_of(&bob()).get(),
            bob_native.get() + withdrawal.amount_native.get()
        );
        prop_assert!(pool.is_backed());
        prop_assert_eq!(native_total(&pool), native_before);
        prop_assert_eq!(token_total(&pool), token_before);
    }
}
