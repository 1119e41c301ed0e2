// Decides which words are real.
pub trait Dictionary {
    // The candidates that are not words, in the order given. Empty when all are recognised.
    fn words_not_recognized(&self, words: &[String]) -> Vec<String>;
}
