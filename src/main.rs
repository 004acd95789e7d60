fn main() {
    if let Err(e) = stardrift::space::run() {
        log::error!("[APP] {}", e);
        eprintln!("stardrift: {}", e);
        std::process::exit(1);
    }
}
