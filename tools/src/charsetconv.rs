extern crate melib_charset;
use std::io::{Read, Write};

use melib_charset::{Converter, Result};

/// Converts standard input from one charset to another and writes the result
/// to standard output. The target charset defaults to UTF-8.
///
/// # Example invocation
/// ```sh
/// ./charsetconv latin1 < body.txt
/// ./charsetconv utf-8 utf7-imap < mailbox_names.txt
/// ```
fn main() -> Result<()> {
    let args = std::env::args().skip(1).collect::<Vec<String>>();
    if args.is_empty() || args.len() > 2 {
        eprintln!("Usage: ./charsetconv FROM [TO] < input");
        std::process::exit(1);
    }

    let mut input = vec![];
    std::io::stdin()
        .read_to_end(&mut input)
        .map_err(|err| format!("Could not read standard input: {}", err))?;
    let converter = Converter::default();
    let output = converter.try_convert(&input, &args[0], args.get(1).map(String::as_str))?;
    std::io::stdout()
        .write_all(&output)
        .map_err(|err| format!("Could not write to standard output: {}", err))?;
    Ok(())
}
