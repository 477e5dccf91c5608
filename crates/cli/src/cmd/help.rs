//! Help mode output

/// Print usage, options, examples and notes
pub fn run() {
    println!("Usage: siv <-i|-v|-h> -D <monitored_directory> -V <verification_file>");
    println!("       -R <report_file> -H <hash_function>");
    println!();
    println!("Options:");
    println!("  -i                       : starts siv in initialization mode");
    println!("  -v                       : starts siv in verification mode");
    println!("  -h                       : help mode");
    println!("  -D <monitored_directory> : the path to the directory to be monitored");
    println!("  -V <verification_file>   : the path to the verification file");
    println!("  -R <report_file>         : the path to the report file");
    println!("  -H <hash_function>       : the hash function to be used");
    println!();
    println!("Examples:");
    println!("siv -i -D /home/user/monitored -V /home/user/verification -R /home/user/report.txt -H md5");
    println!("siv -v -V /home/user/verification -R /home/user/report.txt");
    println!("siv -h");
    println!();
    println!("Notes:");
    println!("- the verification file and the report file have to be outside the monitored directory");
    println!("- the report file has to be a .txt file");
    println!("- the hash function has to be either md5 or sha1");
    println!("- the monitored directory, the verification file and the report file have to be absolute paths");
    println!("- in verification mode the monitored directory and the hash function are read from the verification file");
    println!("- line 4 of the verification file shows the headers for the tsv format below");
}
