use jpeg_metadata::{read_metadata, MetadataError};
use std::env;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <path-to-jpeg-file>", args[0]);
        std::process::exit(1);
    }

    let jpeg_path = &args[1];
    println!("Reading JPEG file: {}", jpeg_path);
    println!("{}", "=".repeat(60));

    let metadata = match read_metadata(jpeg_path) {
        Ok(metadata) => metadata,
        Err(e) => {
            eprintln!("\nERROR: Failed to read JPEG file");
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    };

    if metadata.is_empty() {
        println!("No metadata found.");
        return;
    }

    for directory in metadata.directories() {
        for (tag, value) in directory.tags() {
            // A value that cannot be described is still worth showing raw.
            let description = match directory.description(tag) {
                Ok(Some(text)) => text,
                Ok(None) => continue,
                Err(e @ MetadataError::Description { .. }) => {
                    format!("{} (raw, {})", value, e)
                }
                Err(e) => format!("<{}>", e),
            };
            println!("[{}] {} - {}", directory.name(), directory.tag_name(tag), description);
        }
        for error in directory.errors() {
            println!("[{}] ERROR: {}", directory.name(), error);
        }
    }
}
