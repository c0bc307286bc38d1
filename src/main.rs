fn main() {
    if let Err(e) = medai_explain_lib::run() {
        eprintln!("medai-explain: {e}");
        std::process::exit(1);
    }
}
