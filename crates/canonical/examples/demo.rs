use canonical::{compare, CanonicalError};
use std::{env, fs};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let (Some(original), Some(transformed)) = (args.next(), args.next()) else {
        eprintln!("usage: demo <original.xhtml> <transformed.xhtml>");
        std::process::exit(2);
    };

    let original = fs::read_to_string(original)?;
    let transformed = fs::read_to_string(transformed)?;

    match compare(&original, &transformed) {
        Ok(result) => println!("{}", serde_json::to_string_pretty(&result)?),
        Err(CanonicalError::EmptyContent) => println!("original has no visible text"),
        Err(err) => return Err(err.into()),
    }
    Ok(())
}
