fn main() {
    if let Err(err) = seqlayout::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
