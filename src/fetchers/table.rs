use anyhow::{Result, anyhow};
use log::{debug, warn};
use scraper::{ElementRef, Html, Selector};

use super::RawRows;

/// Row selectors tried in order; the first one that matches anything wins
const ROW_SELECTORS: [&str; 6] = [
    "table tbody tr",
    "table tr",
    ".ranking-table tbody tr",
    ".ranking-table tr",
    "[class*='table'] tbody tr",
    "[class*='table'] tr",
];

/// Pulls the cell text of ranking rows out of an HTML document
pub struct TableParser {
    row_selectors: Vec<(&'static str, Selector)>,
    cell_selector: Selector,
}

impl TableParser {
    pub fn new() -> Result<Self> {
        let row_selectors = ROW_SELECTORS
            .iter()
            .map(|css| Ok((*css, Self::compile(css)?)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            row_selectors,
            cell_selector: Self::compile("td")?,
        })
    }

    /// Parse a full HTML document into raw rows
    pub fn parse_document(&self, html: &str) -> RawRows {
        let document = Html::parse_document(html);
        self.parse_rows(&document)
    }

    fn parse_rows(&self, document: &Html) -> RawRows {
        for (css, selector) in &self.row_selectors {
            let rows: RawRows = document
                .select(selector)
                .map(|row| self.row_cells(row))
                .collect();

            if !rows.is_empty() {
                debug!("Found {} rows using selector: {}", rows.len(), css);
                return rows;
            }
        }

        warn!("No table rows found with any selector");
        Vec::new()
    }

    fn row_cells(&self, row: ElementRef<'_>) -> Vec<String> {
        row.select(&self.cell_selector).map(cell_text).collect()
    }

    fn compile(css: &str) -> Result<Selector> {
        Selector::parse(css).map_err(|e| anyhow!("Invalid selector {css:?}: {e:?}"))
    }
}

/// Visible text of a cell with whitespace runs collapsed
fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const RANKING_HTML: &str = r#"
        <html>
            <body>
                <table class="ranking-table">
                    <thead>
                        <tr><th>Rank</th><th>Player</th><th>Tier</th><th>LP</th><th>Win rate</th><th>Most</th></tr>
                    </thead>
                    <tbody>
                        <tr>
                            <td>1</td>
                            <td><a href="/p/1">Hide on bush</a></td>
                            <td>Challenger</td>
                            <td>1,532 LP</td>
                            <td><span>230승</span> <span>146패</span> <b>(61.17%)</b></td>
                            <td><img alt="Ahri"/> Ahri, Zed</td>
                        </tr>
                        <tr>
                            <td>2</td>
                            <td>Chovy</td>
                            <td>Challenger</td>
                            <td>1,480 LP</td>
                            <td>58.2%</td>
                            <td>Azir</td>
                        </tr>
                    </tbody>
                </table>
            </body>
        </html>
    "#;

    #[test]
    fn parses_body_rows_with_cell_text() {
        let parser = TableParser::new().unwrap();
        let rows = parser.parse_document(RANKING_HTML);

        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[0],
            vec!["1", "Hide on bush", "Challenger", "1,532 LP", "230승 146패 (61.17%)", "Ahri, Zed"]
        );
        assert_eq!(rows[1][1], "Chovy");
    }

    #[test]
    fn document_without_table_yields_no_rows() {
        let parser = TableParser::new().unwrap();
        let rows = parser.parse_document(
            r#"<div class="data-table"><div><p>no real table</p></div></div>"#,
        );

        assert!(rows.is_empty());
    }

    #[test]
    fn header_rows_have_no_cells() {
        let parser = TableParser::new().unwrap();
        let rows = parser.parse_document(
            "<table><tr><th>Rank</th><th>Player</th></tr><tr><td>1</td><td>Faker</td></tr></table>",
        );

        assert_eq!(rows.len(), 2);
        assert!(rows[0].is_empty());
        assert_eq!(rows[1], vec!["1", "Faker"]);
    }
}
