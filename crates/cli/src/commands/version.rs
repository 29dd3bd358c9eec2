pub fn run() {
    println!("richfind {}", env!("CARGO_PKG_VERSION"));
}
