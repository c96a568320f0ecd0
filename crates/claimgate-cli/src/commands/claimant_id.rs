use claimgate_ledger::generate_claimant_id;
use serde_json::json;

pub fn run(claimant: String, asset: String, json_output: bool) {
    let claimant_id = generate_claimant_id(&claimant, &asset);

    if json_output {
        let payload = json!({
            "claimant": claimant,
            "asset": asset,
            "claimant_id": claimant_id.to_string(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).expect("payload should serialize")
        );
        return;
    }

    println!("claimgate claimant-id");
    println!("  Claimant: {claimant}");
    println!("  Asset: {asset}");
    println!("  Claimant Id: {claimant_id}");
}
