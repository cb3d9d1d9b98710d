//! Demonstration of the area-method prover
//!
//! Run with: cargo run --example prover_demo

use area_method_core::*;

fn main() -> ProofResult<()> {
    println!("=== Area-Method Prover Demo ===\n");

    // 1. Construction
    println!("1. Construction:");
    let mut construction = Construction::new();
    let a = construction.free_point("A")?;
    let b = construction.free_point("B")?;
    let c = construction.free_point("C")?;
    let ma = construction.midpoint("Ma", b, c)?;
    let mb = construction.midpoint("Mb", a, c)?;
    let median_a = construction.line("AMa", a, ma)?;
    let median_b = construction.line("BMb", b, mb)?;
    let g = construction.intersection("G", median_a, median_b)?;
    for step in construction.steps() {
        println!("   {}", construction.describe_step(step));
    }
    println!();

    let context = ProverContext::new(construction);

    // 2. A true statement
    println!("2. Centroid divides the median 2:1");
    let statement =
        Statement::equality("centroid", Expr::ratio(a, g, a, ma), Expr::rational(2, 3));
    let report = context.prove(&statement)?;
    println!("   Verdict: {}", report.verdict);
    println!("   Eliminations: {}", report.eliminations);
    println!("   NDG conditions:");
    for condition in report.ndg.iter() {
        println!("     {}", condition.describe(&context.construction().symbols));
    }
    println!();

    // 3. A false statement
    println!("3. Is the centroid on side AB?");
    let report = context.prove(&Statement::collinear(a, b, g))?;
    println!("   Verdict: {}\n", report.verdict);

    // 4. Memo
    println!("4. Proving the centroid statement again:");
    let report = context.prove(&statement)?;
    println!("   From cache: {}", report.from_cache);
    println!("   Memo entries: {}\n", context.memo_len());

    // 5. Trace
    println!("5. Trace statistics:");
    let report = context.prove(&Statement::parallel(ma, mb, a, b))?;
    let stats = report.trace.statistics();
    println!("   Steps: {}", stats.num_steps);
    println!("   Largest expression: {} nodes", stats.max_size);
    if let Some((pass, count)) = stats.most_used_pass() {
        println!("   Most used pass: {} ({} times)", pass, count);
    }

    println!("   First expression:");
    for step in report.trace.steps_for_expression(0) {
        println!("     [{}] {} ({} nodes)", step.id, step.pass, step.size);
    }

    let json = report.trace.to_json_compact()?;
    println!("   JSON size: {} bytes", json.len());

    println!("\n=== Demo Complete ===");
    Ok(())
}
