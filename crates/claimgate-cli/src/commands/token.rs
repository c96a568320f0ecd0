use claimgate_github::{sign_token, verify_signed_token};
use serde_json::json;

pub fn run_sign(token: String, secret: String, json_output: bool) {
    let signed = sign_token(&token, &secret);

    if json_output {
        let payload = json!({ "signed_token": signed });
        println!(
            "{}",
            serde_json::to_string_pretty(&payload).expect("payload should serialize")
        );
        return;
    }

    println!("{signed}");
}

pub fn run_verify(signed: String, secret: String, json_output: bool) {
    match verify_signed_token(&signed, &secret) {
        Ok(token) => {
            if json_output {
                let payload = json!({ "valid": true, "token": token });
                println!(
                    "{}",
                    serde_json::to_string_pretty(&payload).expect("payload should serialize")
                );
            } else {
                println!("{token}");
            }
        }
        Err(err) => {
            if json_output {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&err.to_json())
                        .expect("rejection should serialize")
                );
            } else {
                eprintln!("error: {err}");
            }
            std::process::exit(1);
        }
    }
}
