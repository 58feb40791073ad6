use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};
use voicedrop::{
    config::Config,
    input::load_selected_file,
    models::InputSelection,
    session::UploadSession,
    utils::{init_logger, DEFAULT_LOG_FILTER},
};

#[derive(Debug, Parser)]
#[command(name = "voicedrop", version, about = "Upload text for speech synthesis and fetch the audio")]
struct Cli {
    /// Signing endpoint base URL (overrides API_BASE)
    #[arg(long, global = true)]
    api_base: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Upload a document or a piece of text through a presigned PUT URL
    Upload(UploadArgs),
    /// Sign a fresh GET link for the synthesized audio
    Link(LinkArgs),
}

#[derive(Debug, Args)]
struct UploadArgs {
    /// Document to upload (.txt, .pdf, .docx, .doc)
    #[arg(long, conflicts_with_all = ["text", "text_file"])]
    file: Option<PathBuf>,

    /// Text to synthesize
    #[arg(long, conflicts_with = "text_file")]
    text: Option<String>,

    /// Read the text to synthesize from a file
    #[arg(long)]
    text_file: Option<PathBuf>,

    /// Name to store typed text under (must end with .txt)
    #[arg(long)]
    filename: Option<String>,

    /// Voice to synthesize with
    #[arg(long)]
    voice: Option<String>,
}

#[derive(Debug, Args)]
struct LinkArgs {
    /// Document that was uploaded; its name determines the audio key
    #[arg(long, conflicts_with = "filename")]
    file: Option<PathBuf>,

    /// Name the text was uploaded under
    #[arg(long)]
    filename: Option<String>,

    /// Download the audio to this path once the link is signed
    #[arg(long)]
    download: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger(DEFAULT_LOG_FILTER);

    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(api_base) = cli.api_base {
        config = config.with_api_base(api_base);
    }
    info!(api_base = %config.signing.api_base, "Configuration loaded");

    let session = UploadSession::new(config);
    let outcome = match cli.command {
        Command::Upload(args) => upload(&session, args).await,
        Command::Link(args) => link(&session, args).await,
    };

    print!("{}", session.log().render());

    if let Err(e) = &outcome {
        error!(error = %e, "Action failed");
    }
    outcome
}

async fn upload(session: &UploadSession, args: UploadArgs) -> anyhow::Result<()> {
    let mut selection = match (args.file, args.text, args.text_file) {
        (Some(path), _, _) => InputSelection::file(load_selected_file(&path).await?),
        (None, Some(text), _) => InputSelection::text(text),
        (None, None, Some(path)) => InputSelection::text(tokio::fs::read_to_string(&path).await?),
        (None, None, None) => InputSelection::default(),
    };
    if let Some(filename) = args.filename {
        selection = selection.with_filename(filename);
    }
    if let Some(voice) = args.voice {
        selection = selection.with_voice(voice);
    }

    let receipt = session.upload(&selection).await?;
    info!(input_key = %receipt.input_key, output_key = %receipt.output_key, "Upload complete");
    Ok(())
}

async fn link(session: &UploadSession, args: LinkArgs) -> anyhow::Result<()> {
    // Only the name matters here, so the document itself is not read.
    let filename = match args.file {
        Some(path) => path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| anyhow::anyhow!("Not a file path: {}", path.display()))?,
        None => args.filename.unwrap_or_default(),
    };
    let selection = InputSelection::default().with_filename(filename);

    let link = session.refresh_link(&selection).await?;
    println!("{}", link.get_url);

    if let Some(dest) = args.download {
        session.fetch_audio(&dest).await?;
    }
    Ok(())
}
