mod logger;

use anyhow::{Context, Result};
use book_layout::{
    BookEditor, JsonFilePersistence, LayoutConfiguration, Manuscript, PageView, Persistence,
    SplitType, SpreadView, Template,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::Level;
use std::path::{Path, PathBuf};

use crate::logger::CliLogger;

#[derive(Parser)]
#[command(name = "bookt", about = "Book layout tools CLI", version)]
struct Cli {
    /// Log engine activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lay out a manuscript and list its pages
    Paginate {
        #[command(flatten)]
        layout: LayoutArgs,

        /// Also write the laid-out document to this file
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// List the two-page spreads of a laid-out manuscript
    Spreads {
        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Show document statistics
    Stats {
        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// List the built-in templates
    Templates,

    /// Print or save the configuration of a built-in template
    Template {
        #[arg(value_enum)]
        name: TemplateArg,

        /// Output JSON file (prints to stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a configuration file
    CheckConfig {
        /// Configuration JSON file
        path: PathBuf,
    },

    /// Summarize a document saved with `paginate --save`
    Resume {
        /// Manuscript JSON file
        #[arg(short, long)]
        manuscript: PathBuf,

        /// Saved document file
        #[arg(short, long)]
        document: PathBuf,
    },
}

#[derive(Args)]
struct LayoutArgs {
    /// Manuscript JSON file
    #[arg(short, long)]
    manuscript: PathBuf,

    /// Layout configuration JSON file
    #[arg(short, long, conflicts_with = "template")]
    config: Option<PathBuf>,

    /// Start from a built-in template
    #[arg(short, long, value_enum)]
    template: Option<TemplateArg>,

    /// Text columns (1-4)
    #[arg(long)]
    columns: Option<u8>,

    /// Page split
    #[arg(long, value_enum)]
    split: Option<SplitArg>,

    /// Right-to-left reading direction
    #[arg(long)]
    rtl: bool,

    /// Leave out the table of contents
    #[arg(long)]
    no_toc: bool,

    /// Add a back cover summary page
    #[arg(long)]
    back_cover: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum TemplateArg {
    Classic,
    Modern,
    TwoColumn,
    Magazine,
    MangaRtl,
}

#[derive(Clone, Copy, ValueEnum)]
enum SplitArg {
    None,
    Horizontal,
    Vertical,
    Quadrant,
}

impl From<TemplateArg> for Template {
    fn from(arg: TemplateArg) -> Self {
        match arg {
            TemplateArg::Classic => Self::Classic,
            TemplateArg::Modern => Self::Modern,
            TemplateArg::TwoColumn => Self::TwoColumn,
            TemplateArg::Magazine => Self::Magazine,
            TemplateArg::MangaRtl => Self::MangaRtl,
        }
    }
}

impl From<SplitArg> for SplitType {
    fn from(arg: SplitArg) -> Self {
        match arg {
            SplitArg::None => Self::None,
            SplitArg::Horizontal => Self::Horizontal,
            SplitArg::Vertical => Self::Vertical,
            SplitArg::Quadrant => Self::Quadrant,
        }
    }
}

impl LayoutArgs {
    async fn configuration(&self) -> Result<LayoutConfiguration> {
        let mut config = match (&self.config, self.template) {
            (Some(path), _) => LayoutConfiguration::load(path)
                .await
                .with_context(|| format!("loading configuration {}", path.display()))?,
            (None, Some(template)) => Template::from(template).configuration(),
            (None, None) => LayoutConfiguration::default(),
        };

        if let Some(columns) = self.columns {
            config = config.with_columns(columns);
        }
        if let Some(split) = self.split {
            config = config.with_split_type(split.into());
        }
        if self.rtl {
            config = config.with_rtl(true);
        }
        let mut flags = config.flags;
        flags.include_table_of_contents &= !self.no_toc;
        flags.include_back_cover |= self.back_cover;
        Ok(config.with_flags(flags))
    }

    async fn editor(&self) -> Result<BookEditor> {
        let manuscript = load_manuscript(&self.manuscript).await?;
        let config = self.configuration().await?;
        Ok(BookEditor::new(manuscript, config))
    }
}

async fn load_manuscript(path: &Path) -> Result<Manuscript> {
    Manuscript::load(path)
        .await
        .with_context(|| format!("loading manuscript {}", path.display()))
}

fn describe_page(view: &PageView<'_>) -> String {
    let mut line = format!(
        "{:>4}  {:<18}",
        view.page_number,
        view.page.role.label()
    );
    if !view.page.images.is_empty() {
        line.push_str(&format!(" {} image(s)", view.page.images.len()));
    }
    if let Some(header) = &view.header {
        line.push_str(&format!(" [header: {}|{}|{}]", header.left, header.center, header.right));
    }
    if let Some(label) = &view.page_number_label {
        line.push_str(&format!(" [number {:?} {:?}]", label.edge, label.alignment));
    }
    line
}

fn describe_slot(view: &Option<PageView<'_>>) -> String {
    match view {
        Some(view) => format!("{} {}", view.page_number, view.page.role.label()),
        None => "(empty)".to_string(),
    }
}

fn print_pages(editor: &BookEditor) {
    println!("{} ({} pages)", editor.manuscript().title, editor.pages().len());
    for index in 0..editor.pages().len() {
        if let Some(view) = editor.page_view(index) {
            println!("{}", describe_page(&view));
        }
    }
}

fn print_spreads(editor: &mut BookEditor) {
    let count = editor.navigator().spread_count();
    let direction = if editor.config().is_rtl {
        "right-to-left"
    } else {
        "left-to-right"
    };
    println!("{} spreads, {}", count, direction);

    editor.go_to_spread(0);
    for cursor in 0..count {
        match editor.current_spread() {
            SpreadView::Cover { title, author, .. } => match author {
                Some(author) => println!("  {:>3}  cover: {} by {}", cursor, title, author),
                None => println!("  {:>3}  cover: {}", cursor, title),
            },
            SpreadView::Pages { left, right } => println!(
                "  {:>3}  {:<24} | {}",
                cursor,
                describe_slot(&left),
                describe_slot(&right)
            ),
        }
        editor.next_spread();
    }
}

fn print_stats(editor: &BookEditor) {
    let stats = editor.statistics();
    println!("Document Statistics:");
    println!("  Pages: {}", stats.pages);
    println!("  Spreads: {}", stats.spreads);
    println!("  Chapters: {}", stats.chapters);
    println!("  Blank pages: {}", stats.blank_pages);
    println!("  Images: {}", stats.images);
    println!("  Words: {}", stats.total_words);
    println!("  Words per page (est.): {}", stats.words_per_page);
    println!("  Text pages (est.): {}", stats.estimated_text_pages);
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let logger = CliLogger::new(200, cli.verbose);
    logger.clone().init()?;

    match cli.command {
        Commands::Paginate { layout, save } => {
            let editor = layout.editor().await?;
            print_pages(&editor);

            if let Some(path) = save {
                JsonFilePersistence::new(&path)
                    .persist(editor.snapshot())
                    .await
                    .with_context(|| format!("saving document {}", path.display()))?;
                println!("Saved → {}", path.display());
            }
        }

        Commands::Spreads { layout } => {
            let mut editor = layout.editor().await?;
            print_spreads(&mut editor);
        }

        Commands::Stats { layout } => {
            let editor = layout.editor().await?;
            print_stats(&editor);
        }

        Commands::Templates => {
            for template in Template::ALL {
                let config = template.configuration();
                println!(
                    "  {:<12} {} column(s), {:?} split{}",
                    template.name(),
                    config.columns,
                    config.split_type,
                    if config.is_rtl { ", right-to-left" } else { "" }
                );
            }
        }

        Commands::Template { name, output } => {
            let template = Template::from(name);
            let config = template.configuration();
            match output {
                Some(path) => {
                    config.save(&path).await?;
                    println!("Saved {} → {}", template.name(), path.display());
                }
                None => println!("{}", serde_json::to_string_pretty(&config)?),
            }
        }

        Commands::CheckConfig { path } => {
            let config = LayoutConfiguration::load(&path)
                .await
                .with_context(|| format!("checking {}", path.display()))?;
            println!(
                "{} is valid: {} column(s), {:?} split, margins {}/{}/{}/{} mm",
                path.display(),
                config.columns,
                config.split_type,
                config.margins.top_mm,
                config.margins.right_mm,
                config.margins.bottom_mm,
                config.margins.left_mm
            );
        }

        Commands::Resume {
            manuscript,
            document,
        } => {
            let manuscript = load_manuscript(&manuscript).await?;
            let snapshot = JsonFilePersistence::new(&document)
                .load()
                .await?
                .with_context(|| format!("no saved document at {}", document.display()))?;
            let editor = BookEditor::from_snapshot(manuscript, snapshot);
            print_pages(&editor);
            print_stats(&editor);
        }
    }

    let warnings: Vec<_> = logger
        .entries()
        .into_iter()
        .filter(|entry| entry.level <= Level::Warn)
        .collect();
    if let Some(last) = warnings.last() {
        eprintln!(
            "{} warning(s) logged, last at {}: {}",
            warnings.len(),
            last.timestamp.format("%H:%M:%S"),
            last.message
        );
    }

    Ok(())
}
