use thiserror::Error;

/// Erros possíveis durante a leitura e conversão de extratos bancários
#[derive(Error, Debug)]
pub enum StatementParseError {
    /// Falha genérica durante o parsing do conteúdo (detalhe na mensagem)
    #[error("Parse failed: {0}")]
    ParseFailed(String),

    /// Formato do arquivo não é suportado pela biblioteca
    #[error("Unsupported file format")]
    UnsupportedFormat,

    /// Erro ao ler o conteúdo do arquivo do disco
    #[error("Failed to read file content: {0}")]
    ReadContentFailed(#[from] std::io::Error),

    /// Erro ao criar arquivos ou diretórios de saída
    #[error("Failed to write file: {0}")]
    WriteContentFailed(std::io::Error),

    /// O builder foi chamado sem fornecer conteúdo nem caminho de arquivo
    #[error("Content or filepath is required")]
    MissingContentAndFilepath,

    /// O extrator de texto não conseguiu ler o PDF (arquivo corrompido ou protegido)
    #[error("Failed to extract text from PDF: {0}")]
    PdfExtractFailed(String),

    /// Erro ao gravar o CSV de saída
    #[error("Failed to write CSV: {0}")]
    CsvWriteFailed(#[from] csv::Error),

    /// Arquivo de marcadores (JSON) inválido
    #[error("Invalid markers configuration: {0}")]
    MarkersInvalid(#[from] serde_json::Error),

    /// Padrão de busca de arquivos de entrada inválido
    #[error("Invalid input pattern: {0}")]
    InputPatternInvalid(String),

    // ── Erros de conversão para tipos numéricos/datas ───────────────────────────

    /// Data `DD.MM.YYYY` que não corresponde a um dia real do calendário
    #[error("Invalid statement date format")]
    DateInvalidFormat,

    /// Valor fora da gramática `-1.234,56`
    #[error("Invalid statement amount format")]
    AmountInvalidFormat,
}
