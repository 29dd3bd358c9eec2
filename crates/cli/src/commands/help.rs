pub fn run() {
    println!("Available commands:");
    println!();
    println!("  -version          Show version information");
    println!("  -help             Show this help message");
    println!("  -find             Search a text file and print every match");
    println!("  -replace-all      Replace every match in a text file");
    println!("  -decode-color     Decode a native color value");
    println!("  -encode-color     Encode a hex or theme color");
    println!("  -list-colors      List theme palette colors");
    println!("  -show-config      Display current configuration");
    println!("  -validate-config  Validate configuration file");
    println!();
    println!("Run 'richfind-cli <command> --help' for the options of a command.");
}
