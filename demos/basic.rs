use kulid::{MonotonicUlidGenerator, Ulid, UlidGenerator};

fn main() {
    // Create a generator with the system clock and thread-local randomness
    let generator = MonotonicUlidGenerator::new();

    // Generate a small batch
    let ulids = generator.generate(3).unwrap();

    println!("Generated ULIDs (guaranteed to be monotonic):");
    for ulid in &ulids {
        print_ulid(ulid);
    }

    // Text form round-trips through the parser
    let text = ulids[1].to_string();
    let parsed: Ulid = text.parse().unwrap();
    println!("\nParsed {text} back:");
    println!("  Timestamp: {} ms since epoch", parsed.timestamp());
    println!("  Randomness: {:?}", parsed.randomness());
    println!("  Bytes: {:02x?}", parsed.to_bytes());
}

fn print_ulid(ulid: &Ulid) {
    let datetime = ulid.datetime().unwrap();
    println!(
        "  ULID: {ulid}, Timestamp: {}, Human date: {datetime}",
        ulid.timestamp()
    );
}
