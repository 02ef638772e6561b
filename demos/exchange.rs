//! Native/token exchange example.
//!
//! Demonstrates seeding a pool, quoting and executing swaps in both
//! directions, a slippage-protected order, and withdrawing liquidity.
//!
//! # Run
//!
//! ```bash
//! cargo run --example exchange
//! ```

use exchange_amm::prelude::*;

const WEI: u128 = 1_000_000_000_000_000_000;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    println!("=== Native/Token Exchange (x · y = k, 1% fee) ===\n");

    // ── 1. Accounts and ledgers ─────────────────────────────────────────
    let pool_account = Address::from_bytes([0xEE; 32]);
    let token_address = Address::from_bytes([0x70; 32]);
    let provider = Address::from_bytes([0x01; 32]);
    let trader = Address::from_bytes([0x02; 32]);

    let mut token = MemoryToken::new();
    token.mint(&provider, Amount::new(10_000 * WEI));
    token.mint(&trader, Amount::new(500 * WEI));
    token.approve(&provider, &pool_account, Amount::MAX);
    token.approve(&trader, &pool_account, Amount::MAX);

    let mut native = MemoryNative::new();
    native.credit(&provider, Amount::new(5_000 * WEI));
    native.credit(&trader, Amount::new(100 * WEI));

    // ── 2. Create the pool ──────────────────────────────────────────────
    let config = ExchangeConfig::with_defaults(pool_account, token_address)?;
    let mut pool = Exchange::new(config, token, native)?;
    println!("Pool account: {pool_account}");
    println!("Token:        {token_address}");
    println!("Share token:  {} ({})", pool.name(), pool.symbol());

    // ── 3. Seed 1 000 native : 2 000 tokens ─────────────────────────────
    let deposit = pool.provide_liquidity(
        &provider,
        Amount::new(1_000 * WEI),
        Amount::new(2_000 * WEI),
    )?;
    println!("\n--- Seed ---");
    println!("  {deposit}");
    println!("  Reserves:    {}", pool.reserves());

    // ── 4. Spot prices (scaled by 1000) ─────────────────────────────────
    println!("\n--- Spot prices ---");
    println!(
        "  Native → token: {}",
        pool.spot_price(SwapDirection::NativeToToken)?
    );
    println!(
        "  Token → native: {}",
        pool.spot_price(SwapDirection::TokenToNative)?
    );

    // ── 5. Quote, then sell 1 native ────────────────────────────────────
    let one = Amount::new(WEI);
    let quoted = pool.quote_token_amount(one)?;
    let request = SwapRequest::new(SwapDirection::NativeToToken, one, quoted)?;
    let receipt = pool.swap_in_for_out(&trader, request)?;
    println!("\n--- Swap: sell 1 native ---");
    println!("  Quoted:      {quoted}");
    println!("  {receipt}");

    // ── 6. A stale quote is refused ─────────────────────────────────────
    let stale = SwapRequest::new(SwapDirection::NativeToToken, one, quoted)?;
    match pool.swap_in_for_out(&trader, stale) {
        Err(err) => println!("\nStale order refused: {err}"),
        Ok(receipt) => println!("\nStale order filled: {receipt}"),
    }

    // ── 7. Sell tokens back ─────────────────────────────────────────────
    let tokens = Amount::new(2 * WEI);
    let request = SwapRequest::new(SwapDirection::TokenToNative, tokens, Amount::ZERO)?;
    let receipt = pool.swap_in_for_out(&trader, request)?;
    println!("\n--- Swap: sell 2 tokens ---");
    println!("  {receipt}");
    println!("  Reserves:    {}", pool.reserves());

    // ── 8. Withdraw everything ──────────────────────────────────────────
    let shares = pool.share_balance(&provider);
    let withdrawal = pool.remove_liquidity(&provider, shares)?;
    println!("\n--- Withdraw ---");
    println!("  {withdrawal}");
    println!("  Reserves:    {}", pool.reserves());
    println!(
        "  Provider:    {} native, {} tokens",
        pool.native_ledger().balance_of(&provider),
        pool.token_ledger().balance_of(&provider),
    );

    println!("\n=== Done ===");
    Ok(())
}
