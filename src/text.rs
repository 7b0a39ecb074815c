use std::fs;
use std::path::Path;

use crate::error::{Result, SessionError};

const SAMPLE_PASSAGE: &str = "O rato roeu a roupa do rei de Roma. Digite este texto o mais rápido possível.
Continue praticando para melhorar sua habilidade e rapidez na digitação.
Aprender a digitar rápido ajuda a produtividade e concentração.
Continue praticando todos os dias para se tornar cada vez mais eficiente.
Este é um texto longo para testar a rolagem automática e a responsividade em dispositivos móveis.
Lembre-se de manter a postura correta e os dedos na posição certa para evitar erros.
";

const SAMPLE_REPEATS: usize = 3;

/// Built-in practice text used when no prompt or file is given
pub fn default_text() -> String {
    SAMPLE_PASSAGE.repeat(SAMPLE_REPEATS)
}

/// Split a reference text on whitespace, dropping empty tokens
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_owned).collect()
}

pub fn load<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|source| SessionError::TextSource {
        path: path.to_path_buf(),
        source,
    })
}
