//! `sensei chat` command.
//!
//! Interactive terminal loop against the completion service. History
//! lives in a `ChatSession` owned by this loop and is never shared with
//! the MCP dispatcher.

use clap::Args;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use sensei_completion::{ChatSession, CompletionService};
use sensei_config::SenseiConfig;

use crate::{output, shared};

/// Chat with the configured model in the terminal.
#[derive(Debug, Args)]
pub struct ChatArgs {
    /// Override the completion model.
    #[arg(long)]
    pub model: Option<String>,
}

/// One line of user input, classified.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Empty,
    Exit,
    Reset,
    Message(&'a str),
}

fn classify(line: &str) -> Input<'_> {
    match line.trim() {
        "" => Input::Empty,
        "/exit" | "/quit" => Input::Exit,
        "/reset" => Input::Reset,
        text => Input::Message(text),
    }
}

/// Executes the chat command.
pub async fn execute(args: &ChatArgs, config: &SenseiConfig) -> anyhow::Result<()> {
    let client = shared::create_completion(&config.completion)?;
    let model = args.model.as_deref().unwrap_or(&config.completion.model);
    tracing::info!(model, "chat session started");

    println!("sensei chat ({model}). /reset clears history, /exit quits.");
    run(client.as_ref(), model, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await
}

async fn run<R, W>(
    service: &dyn CompletionService,
    model: &str,
    mut reader: R,
    mut writer: W,
) -> anyhow::Result<()>
where
    R: AsyncBufReadExt + Unpin,
    W: AsyncWriteExt + Unpin,
{
    let mut session = ChatSession::new();
    let mut line = String::new();

    loop {
        writer.write_all(b"> ").await?;
        writer.flush().await?;

        line.clear();
        if reader.read_line(&mut line).await? == 0 {
            writer.write_all(b"\n").await?;
            break;
        }

        match classify(&line) {
            Input::Empty => continue,
            Input::Exit => break,
            Input::Reset => {
                session.reset();
                writer.write_all(b"history cleared\n").await?;
            }
            Input::Message(text) => match session.send(service, model, text).await {
                Ok(reply) => {
                    writer.write_all(reply.as_bytes()).await?;
                    writer.write_all(b"\n\n").await?;
                }
                Err(e) => {
                    output::print_error(&e.to_string());
                    output::print_diagnostic(&e);
                }
            },
        }
    }

    tracing::debug!(turns = session.history().len() / 2, "chat session ended");
    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sensei_completion::{ChatMessage, CompletionError};

    struct Upper;

    #[async_trait::async_trait]
    impl CompletionService for Upper {
        async fn complete(
            &self,
            messages: &[ChatMessage],
            _model: &str,
        ) -> Result<String, CompletionError> {
            let last = messages.last().map(|m| m.content.to_uppercase());
            Ok(format!("{} [{}]", last.unwrap_or_default(), messages.len()))
        }
    }

    async fn transcript(input: &str) -> String {
        let mut out = Vec::new();
        run(&Upper, "m", BufReader::new(input.as_bytes()), &mut out)
            .await
            .expect("run");
        String::from_utf8(out).expect("utf8")
    }

    #[test]
    fn classify_commands() {
        assert_eq!(classify("  \n"), Input::Empty);
        assert_eq!(classify("/exit\n"), Input::Exit);
        assert_eq!(classify("/reset"), Input::Reset);
        assert_eq!(classify(" hi there \n"), Input::Message("hi there"));
    }

    #[tokio::test]
    async fn history_accumulates_until_reset() {
        let out = transcript("hello\nagain\n/reset\nfresh\n").await;
        assert!(out.contains("HELLO [1]"));
        assert!(out.contains("AGAIN [3]"));
        assert!(out.contains("history cleared"));
        assert!(out.contains("FRESH [1]"));
    }

    #[tokio::test]
    async fn exit_stops_reading() {
        let out = transcript("/exit\nignored\n").await;
        assert!(!out.contains("IGNORED"));
    }

    #[tokio::test]
    async fn eof_ends_session() {
        let out = transcript("").await;
        assert_eq!(out, "> \n");
    }
}
