fn main() {
    if let Err(error) = tvmount_cli::run() {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}
