// src/formatting/containers.rs
//! Container blocks: the renderers that fetch their children and inline the
//! result into their own fragment.

use super::converter::{children_failure_label, BlockConverter, BlockOutput};
use super::{ConversionResult, Fragment};
use crate::error::AppError;
use crate::model::{Block, ColumnListBlock, SyncedBlock, TableBlock, ToggleBlock};

/// Each child fragment on a line of its own, appended to the parent text.
fn inline_children(fragments: &[Fragment]) -> String {
    fragments
        .iter()
        .map(|f| format!("\n{}", f.markup))
        .collect()
}

/// A single-item list environment. Adjacent lists are merged after
/// conversion, so every item opens and closes its own environment.
pub(super) fn list_item_markup(environment: &str, option: &str, text: &str, children: &str) -> String {
    format!(
        "\\begin{{{env}}}\n\\item{} {}{}\n\\end{{{env}}}",
        option,
        text,
        children,
        env = environment
    )
}

/// A centered, fully ruled table float.
pub(super) fn table_markup(width: usize, rows: &[String]) -> String {
    let column_spec = vec!["c"; width].join("|");

    let mut lines = Vec::with_capacity(rows.len() + 7);
    lines.push("\n\\begin{table}[H]".to_string());
    lines.push(r"\centering".to_string());
    lines.push(format!(r"\begin{{tabular}}{{|{}|}}", column_spec));
    lines.push(r"\hline".to_string());
    lines.extend(rows.iter().map(|row| format!(r"{} \\ \hline", row)));
    lines.push(r"\end{tabular}".to_string());
    lines.push(r"\caption{}".to_string());
    lines.push(r"\end{table}".to_string());
    lines.join("\n")
}

impl BlockConverter {
    /// Bulleted, numbered and to-do items.
    pub(super) async fn render_list_item(
        &self,
        block: &Block,
        level: usize,
    ) -> Result<BlockOutput, AppError> {
        let (environment, option) = match block {
            Block::BulletedListItem(_) => ("itemize", ""),
            Block::NumberedListItem(_) => ("enumerate", ""),
            Block::ToDo(b) if b.checked => ("todolist", r"[\done]"),
            Block::ToDo(_) => ("todolist", ""),
            _ => return Ok(BlockOutput::default()),
        };
        let text = self.renderer().text(block.rich_text().unwrap_or_default());

        let mut children = if block.has_children() {
            self.convert_children(block.id(), level, children_failure_label(block.id()))
                .await?
        } else {
            ConversionResult::new()
        };

        let markup = list_item_markup(
            environment,
            option,
            &text,
            &inline_children(&children.fragments),
        );
        children.fragments.clear();
        children.blocks_processed += 1;

        Ok(BlockOutput {
            markup,
            effects: children,
        })
    }

    pub(super) async fn render_toggle(
        &self,
        b: &ToggleBlock,
        level: usize,
    ) -> Result<BlockOutput, AppError> {
        let mut markup = self.renderer().toggle_line(b);
        let mut effects = ConversionResult::new();

        if b.common.has_children {
            let mut children = self
                .convert_children(&b.common.id, level, children_failure_label(&b.common.id))
                .await?;
            markup.push_str(&inline_children(&children.fragments));
            // The toggle counts once however many children it folds.
            children.blocks_processed = 0;
            effects.absorb_side_effects(&mut children);
        }

        effects.blocks_processed = 1;
        Ok(BlockOutput { markup, effects })
    }

    /// Tables read their rows directly; rows never go through dispatch.
    pub(super) async fn render_table(&self, b: &TableBlock) -> Result<BlockOutput, AppError> {
        let rows: Vec<_> = match self.fetch_children(&b.common.id).await? {
            Ok(children) => children
                .into_iter()
                .filter_map(|child| match child {
                    Block::TableRow(row) => Some(row),
                    _ => None,
                })
                .collect(),
            Err(e) => {
                log::warn!("Error fetching rows of table {}: {}", b.common.id, e);
                return Ok(BlockOutput::leaf("% Error fetching table rows".to_string()));
            }
        };

        if rows.is_empty() {
            return Ok(BlockOutput::leaf(String::new()));
        }

        let renderer = self.renderer();
        let lines: Vec<String> = rows
            .iter()
            .map(|row| {
                row.cells
                    .iter()
                    .map(|cell| renderer.text(cell))
                    .collect::<Vec<_>>()
                    .join(" & ")
            })
            .collect();

        Ok(BlockOutput::leaf(table_markup(b.table_width, &lines)))
    }

    /// Columns are flattened: their content follows one after the other.
    pub(super) async fn render_column_list(
        &self,
        b: &ColumnListBlock,
        level: usize,
    ) -> Result<BlockOutput, AppError> {
        let mut effects = ConversionResult::new();

        let columns: Vec<_> = match self.fetch_children(&b.common.id).await? {
            Ok(children) => children
                .into_iter()
                .filter(|child| matches!(child, Block::Column(_)))
                .collect(),
            Err(e) => {
                log::warn!("Error fetching columns of {}: {}", b.common.id, e);
                effects.record_error("Error fetching columns");
                return Ok(BlockOutput {
                    markup: "% Error fetching columns".to_string(),
                    effects,
                });
            }
        };

        let mut content = String::new();
        for column in &columns {
            let mut column_result = self
                .convert_children(column.id(), level, "Error processing column blocks.".to_string())
                .await?;

            content.push_str(&column_result.joined_markup("\n"));
            if !content.is_empty() && !content.ends_with('\n') {
                content.push('\n');
            }
            effects.absorb_side_effects(&mut column_result);
        }

        Ok(BlockOutput {
            markup: content.trim().to_string(),
            effects,
        })
    }

    /// Synced blocks always read their own children, original or copy.
    pub(super) async fn render_synced(
        &self,
        b: &SyncedBlock,
        level: usize,
    ) -> Result<BlockOutput, AppError> {
        let mut children = self
            .convert_children(
                &b.common.id,
                level,
                "Error processing synced block children".to_string(),
            )
            .await?;

        let markup = children.joined_markup("\n");
        children.fragments.clear();
        Ok(BlockOutput {
            markup,
            effects: children,
        })
    }
}
