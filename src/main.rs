use codepoints::{codepoints, init_tracing};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let results = codepoints(std::env::args_os().skip(1));
    if results.is_err() {
        eprintln!("Usage: codepoints [--encoding <utf8|utf16le|utf16be|utf32le|utf32be>] [files]");
    }
    results
}
