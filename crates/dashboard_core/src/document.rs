use std::fmt::Write;

use crate::ids::{ElementIds, DASHBOARD_CONTAINER_ID};
use crate::{CardFragment, DomCommand, ProgressState, RenderError, RenderSurface};

#[derive(Debug, Clone, PartialEq, Eq)]
struct CardNode {
    ids: ElementIds,
    title: String,
    log_href: String,
    phase_entries: Vec<String>,
    module_entries: Vec<String>,
    progress: ProgressState,
    finished: bool,
}

impl CardNode {
    fn from_fragment(card: CardFragment) -> Self {
        Self {
            ids: card.ids,
            title: card.title,
            log_href: card.log_href,
            phase_entries: Vec::new(),
            module_entries: Vec::new(),
            progress: ProgressState::default(),
            finished: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    Container,
    ProgressBar,
    PhaseLog,
    ModuleLog,
}

/// In-memory dashboard page: one container holding the job cards in
/// insertion order, plus a status footer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HtmlDocument {
    cards: Vec<CardNode>,
    footer: Option<String>,
}

impl HtmlDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// Container ids of all cards, in document order.
    pub fn card_ids(&self) -> Vec<&str> {
        self.cards
            .iter()
            .map(|card| card.ids.container.as_str())
            .collect()
    }

    pub fn title(&self, container_id: &str) -> Option<&str> {
        self.card_with(container_id, Region::Container)
            .map(|card| card.title.as_str())
    }

    pub fn list_entries(&self, list_id: &str) -> Option<&[String]> {
        let (index, region) = self.locate(list_id)?;
        let card = &self.cards[index];
        match region {
            Region::PhaseLog => Some(card.phase_entries.as_slice()),
            Region::ModuleLog => Some(card.module_entries.as_slice()),
            Region::Container | Region::ProgressBar => None,
        }
    }

    pub fn progress(&self, bar_id: &str) -> Option<ProgressState> {
        self.card_with(bar_id, Region::ProgressBar)
            .map(|card| card.progress)
    }

    pub fn is_finished(&self, container_id: &str) -> Option<bool> {
        self.card_with(container_id, Region::Container)
            .map(|card| card.finished)
    }

    pub fn set_footer(&mut self, text: impl Into<String>) {
        self.footer = Some(text.into());
    }

    fn card_with(&self, element_id: &str, wanted: Region) -> Option<&CardNode> {
        match self.locate(element_id) {
            Some((index, region)) if region == wanted => Some(&self.cards[index]),
            _ => None,
        }
    }

    fn locate(&self, element_id: &str) -> Option<(usize, Region)> {
        self.cards.iter().enumerate().find_map(|(index, card)| {
            let region = if card.ids.container == element_id {
                Region::Container
            } else if card.ids.progress_bar == element_id {
                Region::ProgressBar
            } else if card.ids.phase_log == element_id {
                Region::PhaseLog
            } else if card.ids.module_log == element_id {
                Region::ModuleLog
            } else {
                return None;
            };
            Some((index, region))
        })
    }

    fn locate_as(
        &mut self,
        element_id: &str,
        expected: &'static str,
        accept: impl Fn(Region) -> bool,
    ) -> Result<(&mut CardNode, Region), RenderError> {
        let (index, region) =
            self.locate(element_id)
                .ok_or_else(|| RenderError::MissingElement {
                    element_id: element_id.to_string(),
                })?;
        if !accept(region) {
            return Err(RenderError::WrongKind {
                element_id: element_id.to_string(),
                expected,
            });
        }
        Ok((&mut self.cards[index], region))
    }

    /// Serialize the page. Titles and log lines are escaped, so text coming
    /// from the stream is never interpreted as markup.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        out.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        out.push_str("<title>Service dashboard</title>\n</head>\n<body>\n");
        let _ = writeln!(out, "<div class=\"main\" id=\"{DASHBOARD_CONTAINER_ID}\">");
        for card in &self.cards {
            write_card(&mut out, card);
        }
        out.push_str("</div>\n");
        if let Some(footer) = &self.footer {
            let _ = writeln!(out, "<footer>{}</footer>", escape_markup(footer));
        }
        out.push_str("</body>\n</html>\n");
        out
    }
}

impl RenderSurface for HtmlDocument {
    fn contains(&self, element_id: &str) -> bool {
        element_id == DASHBOARD_CONTAINER_ID || self.locate(element_id).is_some()
    }

    fn list_len(&self, list_id: &str) -> Result<usize, RenderError> {
        match self.locate(list_id) {
            Some((index, Region::PhaseLog)) => Ok(self.cards[index].phase_entries.len()),
            Some((index, Region::ModuleLog)) => Ok(self.cards[index].module_entries.len()),
            Some(_) => Err(RenderError::WrongKind {
                element_id: list_id.to_string(),
                expected: "log list",
            }),
            None => Err(RenderError::MissingElement {
                element_id: list_id.to_string(),
            }),
        }
    }

    fn apply(&mut self, command: DomCommand) -> Result<(), RenderError> {
        match command {
            DomCommand::InsertCard(card) => {
                let ids = &card.ids;
                let taken = [&ids.container, &ids.progress_bar, &ids.phase_log, &ids.module_log]
                    .into_iter()
                    .find(|id| self.contains(id));
                if let Some(id) = taken {
                    return Err(RenderError::DuplicateElement {
                        element_id: id.clone(),
                    });
                }
                self.cards.push(CardNode::from_fragment(card));
            }
            DomCommand::AppendListItem { list_id, text } => {
                let (card, region) = self.locate_as(&list_id, "log list", |region| {
                    matches!(region, Region::PhaseLog | Region::ModuleLog)
                })?;
                if region == Region::PhaseLog {
                    card.phase_entries.push(text);
                } else {
                    card.module_entries.push(text);
                }
            }
            DomCommand::SetProgress { bar_id, state } => {
                let (card, _) =
                    self.locate_as(&bar_id, "progress bar", |region| region == Region::ProgressBar)?;
                card.progress = state;
            }
            DomCommand::MarkFinished { container_id } => {
                let (card, _) =
                    self.locate_as(&container_id, "card", |region| region == Region::Container)?;
                card.finished = true;
            }
            DomCommand::RemoveElement { element_id } => {
                self.locate_as(&element_id, "card", |region| region == Region::Container)?;
                self.cards.retain(|card| card.ids.container != element_id);
            }
        }
        Ok(())
    }
}

fn write_card(out: &mut String, card: &CardNode) {
    let class = if card.finished { "box finished" } else { "box" };
    let _ = writeln!(
        out,
        "<div class=\"{class}\" id=\"{}\">",
        escape_markup(&card.ids.container)
    );
    let _ = writeln!(
        out,
        "<div class=\"mainText\"><span>{}</span></div>",
        escape_markup(&card.title)
    );
    out.push_str("<div class=\"row\">\n");
    write_list(out, "phaseLog", &card.ids.phase_log, &card.phase_entries);
    write_list(out, "moduleLog", &card.ids.module_log, &card.module_entries);
    out.push_str("</div>\n");
    let value = card.progress.value();
    let _ = writeln!(
        out,
        "<div class=\"progress-wrapper\"><div id=\"{}\" class=\"progress-bar\" role=\"progressbar\" \
         aria-valuenow=\"{value}\" aria-valuemin=\"0\" aria-valuemax=\"100\" style=\"width: {}\">{}</div></div>",
        escape_markup(&card.ids.progress_bar),
        card.progress.width(),
        card.progress.label()
    );
    let _ = writeln!(
        out,
        "<div class=\"buttonRow\"><a class=\"btn buttonRowElem\" href=\"{}\">EMBA-log</a></div>",
        escape_markup(&card.log_href)
    );
    out.push_str("</div>\n");
}

fn write_list(out: &mut String, tile: &str, list_id: &str, entries: &[String]) {
    let _ = write!(
        out,
        "<div class=\"col-sm log tile {tile}\"><ul class=\"logUL\" id=\"{}\">",
        escape_markup(list_id)
    );
    for entry in entries {
        let _ = write!(out, "<li>{}</li>", escape_markup(entry));
    }
    out.push_str("</ul></div>\n");
}

/// Escape text for use in element content or a quoted attribute.
pub fn escape_markup(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
