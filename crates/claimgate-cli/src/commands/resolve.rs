use claimgate_core::{ClaimError, ClaimOutcome, Withdrawal, execute_claim, resolve_timeline};
use claimgate_core::{IssueTimeline, WithdrawalError};
use claimgate_ledger::LedgerSnapshot;
use serde_json::json;

use crate::support::{parse_address_or_exit, read_json_file_or_exit};

pub struct Args {
    pub timeline: String,
    pub viewer: String,
    pub ledger: String,
    pub payout: String,
    pub submit: bool,
    pub json: bool,
}

pub fn run(args: Args) {
    let timeline: IssueTimeline = read_json_file_or_exit(&args.timeline, "issue timeline");
    let ledger: LedgerSnapshot = read_json_file_or_exit(&args.ledger, "ledger snapshot");
    let payout = parse_address_or_exit(&args.payout);

    let withdrawal =
        match resolve_timeline(&timeline, &args.viewer, &ledger, &payout.to_string()) {
            Ok(withdrawal) => withdrawal,
            Err(err) => emit_rejection(&err, args.json),
        };

    let outcome = if args.submit {
        match execute_claim(&ledger, &withdrawal, payout) {
            Ok(outcome) => Some(outcome),
            Err(ClaimError::Withdrawal(err)) => emit_rejection(&err, args.json),
            Err(err) => {
                eprintln!("error: claim failed: {err}");
                std::process::exit(1);
            }
        }
    } else {
        None
    };

    if args.json {
        let mut payload = json!({
            "can_withdraw": true,
            "withdrawal": withdrawal,
        });
        if let (Some(outcome), Some(map)) = (&outcome, payload.as_object_mut()) {
            map.insert("claim".to_string(), json!(outcome));
        }
        println!("{}", serde_json::to_string_pretty(&payload).expect("payload should serialize"));
        return;
    }

    print_withdrawal(&withdrawal);
    if let Some(outcome) = &outcome {
        print_outcome(outcome);
    }
}

fn emit_rejection(err: &WithdrawalError, json_output: bool) -> ! {
    if json_output {
        println!(
            "{}",
            serde_json::to_string_pretty(&err.to_json()).expect("rejection should serialize")
        );
    } else {
        println!("claimgate resolve");
        println!("  Can Withdraw: no");
        println!("  Rejection: {}", err.code());
        println!("  Detail: {err}");
    }
    std::process::exit(1);
}

fn print_withdrawal(withdrawal: &Withdrawal) {
    println!("claimgate resolve");
    println!("  Can Withdraw: yes");
    println!("  Issue: {}", withdrawal.issue_url);
    println!("  Claimant: {}", withdrawal.claimant);
    println!("  Asset: {}", withdrawal.claimant_asset);
    println!(
        "  Tier: {}",
        withdrawal
            .tier
            .map_or_else(|| "(none)".to_string(), |tier| tier.to_string())
    );
}

fn print_outcome(outcome: &ClaimOutcome) {
    println!("  Txn Hash: {}", outcome.txn_hash);
    println!("  Closer Data: {}", outcome.closer_data);
}
