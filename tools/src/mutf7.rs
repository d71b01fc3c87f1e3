extern crate melib_charset;
use melib_charset::{decode_utf7_imap, encode_utf7_imap, Result};

/// Encodes or decodes IMAP mailbox names in modified UTF-7 and prints one
/// name per line.
///
/// # Example invocation
/// ```sh
/// ./mutf7 encode "Entwürfe" "Éléments envoyés"
/// ./mutf7 decode "&BB4EQgQ,BEAEMAQyBDsENQQ9BD0ESwQ1-"
/// ```
fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let mode = args.next();
    let names = args.collect::<Vec<String>>();
    if names.is_empty() {
        eprintln!("Usage: ./mutf7 encode|decode NAME [NAME2 NAME3 ..]");
        std::process::exit(1);
    }

    for name in names {
        let bytes = match mode.as_deref() {
            Some("encode") => encode_utf7_imap(name.as_bytes())?,
            Some("decode") => decode_utf7_imap(name.as_bytes())?,
            _ => {
                eprintln!("Usage: ./mutf7 encode|decode NAME [NAME2 NAME3 ..]");
                std::process::exit(1);
            }
        };
        println!("{}", String::from_utf8(bytes)?);
    }
    Ok(())
}
