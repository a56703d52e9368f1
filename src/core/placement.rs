//! Placement engine.
//!
//! Drives each incoming item through classify -> parse -> resolve -> build
//! path -> transfer, one item at a time and in enumeration order. Parse and
//! resolution failures skip the item; transfer failures fail it. Neither
//! stops the run.

use crate::core::parser;
use crate::core::resolver::Resolver;
use crate::core::scanner::{find_sidecars, Sidecar};
use crate::generators::filename::{generate_episode_filename, generate_movie_filename};
use crate::generators::folder::{generate_episode_folder, generate_movie_folder};
use crate::generators::sidecar::sidecar_destination_name;
use crate::models::config::{RunConfig, TransferMode};
use crate::models::media::{Candidate, MediaKind, ParseResult, ParsedVideo, RawItem};
use crate::models::overrides::SeriesOverrides;
use crate::services::catalog::Catalog;
use crate::utils::fs::{self as fsx, FileIdentity};
use crate::Result;
use colored::Colorize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Longest synopsis excerpt shown for an ambiguous candidate.
const SNIPPET_CHARS: usize = 120;

/// One filesystem step of placing an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferAction {
    CreateDir(PathBuf),
    Transfer {
        mode: TransferMode,
        from: PathBuf,
        to: PathBuf,
    },
}

impl std::fmt::Display for TransferAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransferAction::CreateDir(path) => write!(f, "[MKDIR] {}", path.display()),
            TransferAction::Transfer { mode, from, to } => {
                write!(f, "[{}] {} -> {}", mode, from.display(), to.display())
            }
        }
    }
}

/// Final state of one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    /// Placed (or, in a dry run, would be placed) with these actions.
    Placed(Vec<TransferAction>),
    Skipped(String),
    Failed(String),
}

/// Outcome of one item, in processing order.
#[derive(Debug, Clone)]
pub struct ItemReport {
    pub filename: String,
    pub outcome: ItemOutcome,
}

/// Totals for a run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub reports: Vec<ItemReport>,
}

impl RunSummary {
    fn count(&self, pred: impl Fn(&ItemOutcome) -> bool) -> usize {
        self.reports.iter().filter(|r| pred(&r.outcome)).count()
    }

    pub fn placed(&self) -> usize {
        self.count(|o| matches!(o, ItemOutcome::Placed(_)))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, ItemOutcome::Skipped(_)))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, ItemOutcome::Failed(_)))
    }
}

/// Places incoming items into the library.
pub struct PlacementEngine<'a, C: Catalog> {
    config: &'a RunConfig,
    overrides: &'a SeriesOverrides,
    resolver: Resolver<'a, C>,
    /// Files already present in the destination trees (link mode only),
    /// filled on first use and extended as items are linked.
    linked: Option<HashSet<FileIdentity>>,
}

impl<'a, C: Catalog> PlacementEngine<'a, C> {
    pub fn new(config: &'a RunConfig, catalog: &'a C, overrides: &'a SeriesOverrides) -> Self {
        Self {
            config,
            overrides,
            resolver: Resolver::new(catalog, config.keep_file_episode_title),
            linked: None,
        }
    }

    /// Process all items sequentially.
    pub async fn run(&mut self, items: &[RawItem]) -> RunSummary {
        let mut summary = RunSummary::default();

        for item in items {
            let outcome = self.process_item(item).await;
            summary.reports.push(ItemReport {
                filename: item.filename.clone(),
                outcome,
            });
            println!();
        }

        summary
    }

    /// Take one item from discovery to placement.
    pub async fn process_item(&mut self, item: &RawItem) -> ItemOutcome {
        println!("{} {}", "Processing".bold(), item.filename.bold());

        if self.config.mode == TransferMode::Link && self.is_already_linked(&item.path) {
            let reason = "already linked into the library".to_string();
            println!("  {} {}", "[SKIP]".red(), reason);
            return ItemOutcome::Skipped(reason);
        }

        let video = match self.plan_item(item).await {
            Ok(video) => video,
            Err(e) => return self.report_error(e),
        };

        let sidecars = find_sidecars(&item.path);
        let actions = self.build_actions(&video, &sidecars);

        match self.apply(&actions) {
            Ok(()) => ItemOutcome::Placed(actions),
            Err(e) => self.report_error(e),
        }
    }

    /// Classify, parse, resolve and build the destination of one item.
    pub async fn plan_item(&self, item: &RawItem) -> Result<ParsedVideo> {
        let parsed = parser::parse(&item.filename, self.overrides)?;

        let video = match parsed {
            ParseResult::Movie(query) => {
                tracing::debug!("Movie query: {:?}", query);
                let movie = self.resolver.resolve_movie(&query).await?;
                ParsedVideo {
                    kind: MediaKind::Movie,
                    source: item.path.clone(),
                    source_filename: item.filename.clone(),
                    destination_folder: self.config.movies_dir.join(generate_movie_folder(&movie)),
                    destination_filename: generate_movie_filename(&movie, &query.remainder, &query.extension),
                }
            }
            ParseResult::Episode(query) => {
                tracing::debug!("Episode query: {:?}", query);
                let episode = self.resolver.resolve_episode(&query).await?;
                ParsedVideo {
                    kind: MediaKind::Episode,
                    source: item.path.clone(),
                    source_filename: item.filename.clone(),
                    destination_folder: self.config.series_dir.join(generate_episode_folder(&episode)),
                    destination_filename: generate_episode_filename(&episode, &query.remainder, &query.extension),
                }
            }
        };

        println!("  {} {}", "Matched".green(), video.destination_filename);
        Ok(video)
    }

    /// Filesystem steps for a planned item: folder, primary file, sidecars.
    pub fn build_actions(&self, video: &ParsedVideo, sidecars: &[Sidecar]) -> Vec<TransferAction> {
        let mode = self.config.mode;
        let mut actions = vec![
            TransferAction::CreateDir(video.destination_folder.clone()),
            TransferAction::Transfer {
                mode,
                from: video.source.clone(),
                to: video.destination(),
            },
        ];

        let stem = video
            .destination_filename
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(&video.destination_filename);

        for sidecar in sidecars {
            let name = sidecar_destination_name(&sidecar.kind, &sidecar.suffix, stem, video.kind);
            actions.push(TransferAction::Transfer {
                mode,
                from: sidecar.path.clone(),
                to: video.destination_folder.join(name),
            });
        }

        actions
    }

    /// Perform (or, in a dry run, announce) the actions of one item.
    fn apply(&mut self, actions: &[TransferAction]) -> Result<()> {
        check_destinations(actions)?;
        let prefix = if self.config.dry_run { "[DRY-RUN] " } else { "" };

        for action in actions {
            match action {
                TransferAction::CreateDir(path) => {
                    if path.is_dir() {
                        continue;
                    }
                    println!("  {}", format!("{}{}", prefix, action).cyan());
                    if !self.config.dry_run {
                        fsx::create_dir_all(path)?;
                    }
                }
                TransferAction::Transfer { mode, from, to } => {
                    // Only the same file can still be there after the check.
                    if to.exists() {
                        tracing::debug!("Already in place: {}", to.display());
                        continue;
                    }

                    println!("  {}", format!("{}{}", prefix, action).cyan());
                    if self.config.dry_run {
                        continue;
                    }
                    match mode {
                        TransferMode::Move => fsx::move_file(from, to)?,
                        TransferMode::Link => {
                            fsx::link_file(from, to)?;
                            if let (Some(linked), Some(identity)) = (self.linked.as_mut(), fsx::file_identity(to)) {
                                linked.insert(identity);
                            }
                        }
                    }
                }
            }
        }

        Ok(())
    }

    /// Whether `source` is a hard link of a file already in a destination tree.
    fn is_already_linked(&mut self, source: &Path) -> bool {
        if fsx::link_count(source) < 2 {
            return false;
        }
        let Some(identity) = fsx::file_identity(source) else {
            return false;
        };

        let config = self.config;
        self.linked
            .get_or_insert_with(|| {
                fsx::collect_identities(&[config.movies_dir.as_path(), config.series_dir.as_path()])
            })
            .contains(&identity)
    }

    fn report_error(&self, error: crate::Error) -> ItemOutcome {
        if let crate::Error::Ambiguous { query, candidates } = &error {
            print_candidates(query, candidates);
        }

        if error.is_skip() {
            println!("  {} {}", "[SKIP]".red(), error);
            tracing::debug!("Skipped: {}", error);
            ItemOutcome::Skipped(error.to_string())
        } else {
            println!("  {} {}", "[FAIL]".red().bold(), error);
            tracing::error!("Item failed: {}", error);
            ItemOutcome::Failed(error.to_string())
        }
    }
}

/// Fail on any destination that is taken by a different file, or that
/// two transfers of the item would both write. Runs before the first
/// mutation so an item is placed whole or not at all.
pub fn check_destinations(actions: &[TransferAction]) -> Result<()> {
    let mut claimed = HashSet::new();

    for action in actions {
        let TransferAction::Transfer { from, to, .. } = action else {
            continue;
        };
        let taken = to.exists() && !fsx::same_file(from, to);
        if taken || !claimed.insert(to.as_path()) {
            return Err(crate::Error::FileAlreadyExists(to.display().to_string()));
        }
    }

    Ok(())
}

/// List ambiguous candidates for the operator.
pub fn print_candidates(query: &str, candidates: &[Candidate]) {
    println!(
        "  {} {} matches for {}:",
        "[AMBIGUOUS]".yellow().bold(),
        candidates.len(),
        query
    );
    for candidate in candidates {
        let year = candidate.date.get(..4).unwrap_or("????");
        println!(
            "    {} {} ({}) {}",
            format!("[tmdbid-{}]", candidate.id).bold(),
            candidate.title,
            year,
            candidate.url.dimmed()
        );
        let snippet = candidate.overview_snippet(SNIPPET_CHARS);
        if !snippet.is_empty() {
            println!("      {}", snippet);
        }
    }
    println!(
        "  {} add the right {} to the file name and run again",
        "->".yellow(),
        "[tmdbid-N]".bold()
    );
}
