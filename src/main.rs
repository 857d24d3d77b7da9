fn main() {
    if let Err(err) = nn::entry() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
