fn main() {
    if let Err(err) = site_redirects::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
