use alloy::primitives::Address;
use std::fs;

pub fn read_json_file_or_exit<T>(path: &str, label: &str) -> T
where
    T: serde::de::DeserializeOwned,
{
    let bytes = fs::read(path).unwrap_or_else(|e| {
        eprintln!("error: failed to read {label} at {path}: {e}");
        std::process::exit(1);
    });
    serde_json::from_slice::<T>(&bytes).unwrap_or_else(|e| {
        eprintln!("error: failed to parse {label} JSON at {path}: {e}");
        std::process::exit(1);
    })
}

pub fn read_text_file_or_exit(path: &str, label: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("error: failed to read {label} at {path}: {e}");
        std::process::exit(1);
    })
}

pub fn parse_address_or_exit(raw: &str) -> Address {
    raw.parse().unwrap_or_else(|e| {
        eprintln!("error: invalid payout address `{raw}`: {e}");
        std::process::exit(1);
    })
}
