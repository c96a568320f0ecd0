use claimgate_core::{closer_issue_numbers, tier_placement};
use serde_json::json;

use crate::support::read_text_file_or_exit;

pub fn run(path: String, owner: String, repo: String, json_output: bool) {
    let text = read_text_file_or_exit(&path, "candidate text");
    let closers = closer_issue_numbers(&text, &owner, &repo);
    let placement = tier_placement(&text);

    if json_output {
        let payload = json!({
            "owner": owner,
            "repo": repo,
            "closes": closers,
            "tier_placement": placement,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).expect("payload should serialize")
        );
        return;
    }

    println!("claimgate extract");
    println!(
        "  Closes: {}",
        if closers.is_empty() {
            "(none)".to_string()
        } else {
            closers
                .iter()
                .map(|number| format!("#{number}"))
                .collect::<Vec<_>>()
                .join(", ")
        }
    );
    println!(
        "  Tier Placement: {}",
        placement.map_or_else(|| "(none)".to_string(), |place| place.to_string())
    );
}
