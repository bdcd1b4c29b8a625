//! Parsing of the lines typed at the prompt.
//!
//! `/w <playerId> <message>` whispers to one player, anything else is said to
//! everyone.

use officeverse_server::domain::{ChatFrame, PlayerId};
use thiserror::Error;

const WHISPER: &str = "/w";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Say(String),
    Whisper { target: PlayerId, text: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Usage: /w <playerId> <message>")]
    Usage,

    #[error("'{0}' is not a player ID")]
    InvalidTarget(String),
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let Some(rest) = line.strip_prefix(WHISPER) else {
            return Ok(Self::Say(line.to_string()));
        };
        // "/what" is an ordinary message
        if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
            return Ok(Self::Say(line.to_string()));
        }

        let (target, text) = rest
            .trim_start()
            .split_once(char::is_whitespace)
            .ok_or(CommandError::Usage)?;
        let text = text.trim_start();
        if text.is_empty() {
            return Err(CommandError::Usage);
        }
        let target = target
            .parse()
            .map_err(|_| CommandError::InvalidTarget(target.to_string()))?;

        Ok(Self::Whisper {
            target,
            text: text.to_string(),
        })
    }

    /// Frame sent on behalf of `me`
    pub fn into_frame(self, me: PlayerId) -> ChatFrame {
        match self {
            Self::Say(text) => ChatFrame::Global {
                sender: me.to_string(),
                text,
            },
            Self::Whisper { target, text } => ChatFrame::Private {
                sender: me.to_string(),
                target,
                text,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_line_is_global() {
        // テスト項目: 通常の入力は GLOBAL フレームになる
        // given (前提条件):
        let line = "hello: world";

        // when (操作):
        let frame = Command::parse(line).map(|c| c.into_frame(PlayerId::new(7)));

        // then (期待する結果):
        assert_eq!(
            frame.map(|f| f.to_string()),
            Ok("GLOBAL:7:hello: world".to_string())
        );
    }

    #[test]
    fn test_whisper_is_private() {
        // テスト項目: /w コマンドは PRIVATE フレームになる
        // given (前提条件):
        let line = "/w 2 see you  later";

        // when (操作):
        let frame = Command::parse(line).map(|c| c.into_frame(PlayerId::new(1)));

        // then (期待する結果):
        assert_eq!(
            frame.map(|f| f.to_string()),
            Ok("PRIVATE:1:2:see you  later".to_string())
        );
    }

    #[test]
    fn test_whisper_without_message() {
        // テスト項目: 宛先やメッセージが欠けた /w は使い方エラーになる
        // given (前提条件):
        let lines = ["/w", "/w 2", "/w 2   "];

        // when (操作) / then (期待する結果):
        for line in lines {
            assert_eq!(Command::parse(line), Err(CommandError::Usage), "{line}");
        }
    }

    #[test]
    fn test_whisper_with_invalid_target() {
        // テスト項目: 数値でない宛先はエラーになる
        // given (前提条件):
        let line = "/w bob hi";

        // when (操作):
        let result = Command::parse(line);

        // then (期待する結果):
        assert_eq!(result, Err(CommandError::InvalidTarget("bob".to_string())));
    }

    #[test]
    fn test_word_starting_with_w_is_not_a_command() {
        // テスト項目: "/w" で始まるだけの単語はコマンドとして扱わない
        // given (前提条件):
        let line = "/what is this";

        // when (操作):
        let result = Command::parse(line);

        // then (期待する結果):
        assert_eq!(result, Ok(Command::Say("/what is this".to_string())));
    }
}
