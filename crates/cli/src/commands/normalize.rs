//! `switchboard normalize` — run text through the normalizer.

pub fn run(text: &str) {
    println!("{}", switchboard_textnorm::normalize(text));
}
