fn main() {
    if let Err(err) = tile_wordcloud::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
