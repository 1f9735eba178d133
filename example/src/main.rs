fn main() {
    if let Err(err) = example::run() {
        tracing::error!(%err, "demo session failed");
        std::process::exit(1);
    }
}
