use clap::Parser;

/// A small threaded-code Forth virtual machine.
#[derive(Parser, Debug)]
#[command(name = "tforth")]
#[command(version, about = "A small threaded-code Forth virtual machine")]
pub struct Config {
    /// Log filter, for example `warn` or `tforth=trace`
    #[arg(long, env = "TFORTH_LOG", default_value = "warn")]
    pub log_level: String,

    /// Print the virtual machine's state after every line
    #[arg(long)]
    pub show_state: bool,

    /// Process a line before the interactive session starts, may be given more than once
    #[arg(short, long = "eval", value_name = "LINE")]
    pub eval: Vec<String>,

    /// Exit after the --eval lines instead of reading from stdin
    #[arg(long)]
    pub no_repl: bool,

    /// Prompt printed before every interactive line
    #[arg(long, default_value = "")]
    pub prompt: String,
}
