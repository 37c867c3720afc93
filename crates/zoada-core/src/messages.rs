//! 언어별 사용자 메시지.
//!
//! 언어마다 페이지를 복제하는 대신 하나의 구현에 문자열 테이블을 주입한다.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// 지원 언어
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// 포르투갈어 (기본)
    #[default]
    Pt,
    /// 영어
    En,
}

/// 메시지 키
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    InvalidFormat,
    FileTooLarge,
    FileCorrupt,
    NoImageSelected,
    NoProcessedImage,
    UploadFailed,
    ProcessFailed,
    DownloadFailed,
    CopyFailed,
    CopySucceeded,
    Uploading,
    Processing,
    Unexpected,
    ConsentNotice,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::Pt => "pt",
            Locale::En => "en",
        }
    }

    /// 메시지 키에 해당하는 문자열
    pub fn text(self, message: Message) -> &'static str {
        match self {
            Locale::Pt => pt(message),
            Locale::En => en(message),
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pt" | "pt-br" | "pt_br" => Ok(Locale::Pt),
            "en" | "en-us" | "en_us" => Ok(Locale::En),
            other => Err(format!("지원하지 않는 언어: {other}")),
        }
    }
}

fn pt(message: Message) -> &'static str {
    match message {
        Message::InvalidFormat => "Formato inválido. Use PNG, WEBP, JPG ou JPEG.",
        Message::FileTooLarge => "Arquivo muito grande. Tamanho máximo: 10MB.",
        Message::FileCorrupt => "Arquivo parece estar corrompido ou vazio.",
        Message::NoImageSelected => "Nenhuma imagem selecionada.",
        Message::NoProcessedImage => "Nenhuma imagem processada para download.",
        Message::UploadFailed => {
            "Não foi possível fazer upload da imagem. Verifique sua conexão e tente novamente."
        }
        Message::ProcessFailed => "Erro ao processar a imagem. Tente novamente.",
        Message::DownloadFailed => "Erro ao baixar a imagem. Tente novamente.",
        Message::CopyFailed => {
            "Não foi possível copiar a imagem. Tente usar o botão de download."
        }
        Message::CopySucceeded => "Imagem copiada para a área de transferência.",
        Message::Uploading => "Carregando imagem...",
        Message::Processing => "Processando imagem...",
        Message::Unexpected => "Erro inesperado.",
        Message::ConsentNotice => {
            "Usamos cookies para melhorar sua experiência. Execute `zoada consent accept` para aceitar."
        }
    }
}

fn en(message: Message) -> &'static str {
    match message {
        Message::InvalidFormat => "Invalid format. Use PNG, WEBP, JPG or JPEG.",
        Message::FileTooLarge => "File too large. Maximum size: 10MB.",
        Message::FileCorrupt => "File seems to be corrupted or empty.",
        Message::NoImageSelected => "No image selected.",
        Message::NoProcessedImage => "No processed image to download.",
        Message::UploadFailed => "Could not upload the image. Check your connection and try again.",
        Message::ProcessFailed => "Could not process the image. Try again.",
        Message::DownloadFailed => "Could not download the image. Try again.",
        Message::CopyFailed => "Could not copy the image. Try using the download button.",
        Message::CopySucceeded => "The image has been copied to clipboard.",
        Message::Uploading => "Uploading image...",
        Message::Processing => "Processing image...",
        Message::Unexpected => "Unexpected error.",
        Message::ConsentNotice => {
            "We use cookies to improve your experience. Run `zoada consent accept` to accept."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_parse() {
        assert_eq!("pt".parse::<Locale>().unwrap(), Locale::Pt);
        assert_eq!("EN".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!("pt-BR".parse::<Locale>().unwrap(), Locale::Pt);
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn every_message_has_text_in_both_locales() {
        let all = [
            Message::InvalidFormat,
            Message::FileTooLarge,
            Message::FileCorrupt,
            Message::NoImageSelected,
            Message::NoProcessedImage,
            Message::UploadFailed,
            Message::ProcessFailed,
            Message::DownloadFailed,
            Message::CopyFailed,
            Message::CopySucceeded,
            Message::Uploading,
            Message::Processing,
            Message::Unexpected,
            Message::ConsentNotice,
        ];
        for msg in all {
            assert!(!Locale::Pt.text(msg).is_empty());
            assert!(!Locale::En.text(msg).is_empty());
        }
    }
}
