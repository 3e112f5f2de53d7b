//! Bundled message templates and rendering.

use super::{MessageKey, UserMessage};
use minijinja::Environment;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Languages with bundled message templates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    /// English.
    #[default]
    En,
    /// Spanish.
    Es,
}

impl Locale {
    /// Returns the canonical language tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Es => "es",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Locale {
    type Error = ParseLocaleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        let language = normalized
            .split(['-', '_'])
            .next()
            .unwrap_or_default();
        match language {
            "en" => Ok(Self::En),
            "es" => Ok(Self::Es),
            _ => Err(ParseLocaleError(value.to_owned())),
        }
    }
}

/// Error returned when a locale tag has no bundled templates.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unsupported locale: {0}")]
pub struct ParseLocaleError(pub String);

/// Errors returned while rendering a message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MessageError {
    /// The template failed to render with the supplied parameters.
    #[error("failed to render message '{key}': {reason}")]
    TemplateRender {
        /// Message key being rendered.
        key: MessageKey,
        /// Renderer diagnostic.
        reason: String,
    },
}

/// Renders [`UserMessage`] values for one locale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MessageCatalog {
    locale: Locale,
}

impl MessageCatalog {
    /// Creates a catalog for the given locale.
    #[must_use]
    pub const fn new(locale: Locale) -> Self {
        Self { locale }
    }

    /// Returns the catalog locale.
    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// Renders a message into display text.
    ///
    /// # Errors
    ///
    /// Returns [`MessageError::TemplateRender`] when the template references
    /// a parameter with an incompatible value.
    pub fn render(&self, message: &UserMessage) -> Result<String, MessageError> {
        let environment = Environment::new();
        environment
            .render_str(template(self.locale, message.key()), message.params())
            .map_err(|error| MessageError::TemplateRender {
                key: message.key(),
                reason: error.to_string(),
            })
    }
}

const fn template(locale: Locale, key: MessageKey) -> &'static str {
    match locale {
        Locale::En => english(key),
        Locale::Es => spanish(key),
    }
}

const fn english(key: MessageKey) -> &'static str {
    match key {
        MessageKey::ConnectInitializationFailed => {
            "We couldn't start connecting your device. Please try again from settings."
        }
        MessageKey::ConnectRetriesExhausted => {
            "Connecting your device took too many retries. Please try again from settings."
        }
        MessageKey::ConnectTaskFailed => {
            "Your device could not be connected. Please try again from settings."
        }
        MessageKey::ConnectResultsUnavailable => {
            "Your device was prepared but the connection details are unavailable. Please try again later."
        }
        MessageKey::ConnectStatusCheckFailed => {
            "We lost track of the connection progress. Please try again from settings."
        }
        MessageKey::ConnectMissingTask => {
            "This synchronization link is incomplete. Returning to settings."
        }
        MessageKey::ConnectTimedOut => {
            "Connecting your device is taking too long. Please try again from settings."
        }
        MessageKey::DisconnectInitializationFailed => {
            "We couldn't start disconnecting your device. Please try again."
        }
        MessageKey::DisconnectTaskFailed => "Your device could not be disconnected.",
        MessageKey::DisconnectAttemptsExhausted => {
            "Disconnecting your device did not finish in time. Please try again."
        }
        MessageKey::DisconnectStatusCheckFailed => {
            "We lost track of the disconnection progress. Please try again."
        }
        MessageKey::DisconnectTimedOut => {
            "Disconnecting your device is taking too long. Please try again."
        }
        MessageKey::ConsentReportFailed => {
            "We couldn't save your consent. You can continue to the app."
        }
        MessageKey::OtpMalformedCode => "Enter the 6-digit code we sent to {{ email }}.",
        MessageKey::OtpAttemptsRemaining => {
            "That code is incorrect. Attempts remaining: {{ remaining }}."
        }
        MessageKey::OtpAttemptsExhausted => {
            "Too many incorrect attempts. Request a new code to continue."
        }
        MessageKey::OtpRequestFailed => "We couldn't check your code. Please try again.",
        MessageKey::OtpResendFailed => "We couldn't send a new code. Please try again.",
        MessageKey::OtpAlreadyVerified => "This code has already been verified.",
    }
}

const fn spanish(key: MessageKey) -> &'static str {
    match key {
        MessageKey::ConnectInitializationFailed => {
            "No pudimos empezar a conectar tu dispositivo. Inténtalo de nuevo desde ajustes."
        }
        MessageKey::ConnectRetriesExhausted => {
            "La conexión de tu dispositivo superó el número de reintentos. Inténtalo de nuevo desde ajustes."
        }
        MessageKey::ConnectTaskFailed => {
            "No se pudo conectar tu dispositivo. Inténtalo de nuevo desde ajustes."
        }
        MessageKey::ConnectResultsUnavailable => {
            "Tu dispositivo está listo pero los datos de conexión no están disponibles. Inténtalo más tarde."
        }
        MessageKey::ConnectStatusCheckFailed => {
            "Perdimos el progreso de la conexión. Inténtalo de nuevo desde ajustes."
        }
        MessageKey::ConnectMissingTask => {
            "Este enlace de sincronización está incompleto. Volviendo a ajustes."
        }
        MessageKey::ConnectTimedOut => {
            "La conexión de tu dispositivo está tardando demasiado. Inténtalo de nuevo desde ajustes."
        }
        MessageKey::DisconnectInitializationFailed => {
            "No pudimos empezar a desconectar tu dispositivo. Inténtalo de nuevo."
        }
        MessageKey::DisconnectTaskFailed => "No se pudo desconectar tu dispositivo.",
        MessageKey::DisconnectAttemptsExhausted => {
            "La desconexión de tu dispositivo no terminó a tiempo. Inténtalo de nuevo."
        }
        MessageKey::DisconnectStatusCheckFailed => {
            "Perdimos el progreso de la desconexión. Inténtalo de nuevo."
        }
        MessageKey::DisconnectTimedOut => {
            "La desconexión de tu dispositivo está tardando demasiado. Inténtalo de nuevo."
        }
        MessageKey::ConsentReportFailed => {
            "No pudimos guardar tu consentimiento. Puedes continuar a la aplicación."
        }
        MessageKey::OtpMalformedCode => "Introduce el código de 6 dígitos enviado a {{ email }}.",
        MessageKey::OtpAttemptsRemaining => {
            "El código es incorrecto. Intentos restantes: {{ remaining }}."
        }
        MessageKey::OtpAttemptsExhausted => {
            "Demasiados intentos incorrectos. Solicita un código nuevo para continuar."
        }
        MessageKey::OtpRequestFailed => {
            "No pudimos comprobar tu código. Inténtalo de nuevo."
        }
        MessageKey::OtpResendFailed => "No pudimos enviar un código nuevo. Inténtalo de nuevo.",
        MessageKey::OtpAlreadyVerified => "Este código ya ha sido verificado.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Locale::En, "That code is incorrect. Attempts remaining: 3.")]
    #[case(Locale::Es, "El código es incorrecto. Intentos restantes: 3.")]
    fn renders_attempts_remaining(#[case] locale: Locale, #[case] expected: &str) {
        let message = UserMessage::new(MessageKey::OtpAttemptsRemaining).with_param("remaining", 3);

        let rendered = MessageCatalog::new(locale)
            .render(&message)
            .expect("template should render");

        assert_eq!(rendered, expected);
    }

    #[test]
    fn missing_parameters_render_empty() {
        let rendered = MessageCatalog::default()
            .render(&UserMessage::new(MessageKey::OtpMalformedCode))
            .expect("template should render");

        assert_eq!(rendered, "Enter the 6-digit code we sent to .");
    }

    #[rstest]
    #[case("en", Locale::En)]
    #[case("en-GB", Locale::En)]
    #[case(" ES_mx ", Locale::Es)]
    fn parses_locale_tags(#[case] raw: &str, #[case] expected: Locale) {
        assert_eq!(Locale::try_from(raw), Ok(expected));
    }

    #[test]
    fn rejects_unknown_locale() {
        assert_eq!(
            Locale::try_from("fr"),
            Err(ParseLocaleError("fr".to_owned()))
        );
    }
}
