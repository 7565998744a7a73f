//! E-utilities XML extraction.
//!
//! Both responses are walked with a streaming `quick-xml` reader. Element text is the
//! concatenation of every text and CDATA node beneath the element, so inline markup
//! inside titles and affiliations does not truncate them.
//!
//! Extraction rules for each `PubmedArticle`:
//!
//! - identifier: first `PMID` descendant, empty (with a warning) when absent
//! - title: first `ArticleTitle` descendant, empty when absent
//! - year: `Year` child of the first `PubDate` descendant, `"Unknown"` when absent
//! - authors: every `Author` descendant, with `LastName`/`ForeName` children and the
//!   first `Affiliation` descendant; authors without an affiliation are skipped

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::classifier::{AffiliationClassifier, extract_email};
use crate::error::{FetchError, FetchResult};
use crate::models::{Paper, PaperBuilder};

/// One step of a document walk.
#[derive(Debug, Clone, Copy)]
enum Node<'a> {
    Start(&'a [u8]),
    Text(&'a str),
    End(&'a [u8]),
}

/// Walk a document, reporting each node with its element depth (root = 1).
///
/// Rejects documents without a root element, with more than one root, with
/// non-whitespace text outside the root, or with unclosed elements.
fn walk<F>(xml: &str, mut visit: F) -> FetchResult<()>
where
    F: FnMut(Node<'_>, usize) -> FetchResult<()>,
{
    let mut reader = Reader::from_str(xml);
    let mut open: Vec<Vec<u8>> = Vec::new();
    let mut seen_root = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                if open.is_empty() && seen_root {
                    return Err(FetchError::parse("junk after document element"));
                }
                seen_root = true;
                open.push(e.name().as_ref().to_vec());
                visit(Node::Start(e.name().as_ref()), open.len())?;
            }
            Event::Empty(e) => {
                if open.is_empty() && seen_root {
                    return Err(FetchError::parse("junk after document element"));
                }
                seen_root = true;
                let depth = open.len() + 1;
                visit(Node::Start(e.name().as_ref()), depth)?;
                visit(Node::End(e.name().as_ref()), depth)?;
            }
            Event::End(e) => {
                let depth = open.len();
                if depth == 0 {
                    return Err(FetchError::parse("unexpected closing tag"));
                }
                visit(Node::End(e.name().as_ref()), depth)?;
                open.pop();
            }
            Event::Text(e) => {
                let text = e.unescape().map_err(|err| FetchError::parse(err.to_string()))?;
                if open.is_empty() {
                    if !text.trim().is_empty() {
                        return Err(FetchError::parse("text outside document element"));
                    }
                    continue;
                }
                visit(Node::Text(&text), open.len())?;
            }
            Event::CData(e) => {
                if open.is_empty() {
                    return Err(FetchError::parse("CDATA outside document element"));
                }
                let text = String::from_utf8_lossy(&e);
                visit(Node::Text(&text), open.len())?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !seen_root {
        return Err(FetchError::parse("no element found"));
    }
    if let Some(name) = open.last() {
        return Err(FetchError::parse(format!(
            "unclosed element <{}>",
            String::from_utf8_lossy(name)
        )));
    }

    Ok(())
}

/// Collect the text of every `Id` element in an esearch response, in document order.
///
/// Ids are trimmed; blank ids are dropped.
pub fn parse_id_list(xml: &str) -> FetchResult<Vec<String>> {
    let mut ids = Vec::new();
    let mut current: Option<(usize, String)> = None;

    walk(xml, |node, depth| {
        match node {
            Node::Start(b"Id") if current.is_none() => current = Some((depth, String::new())),
            Node::Text(text) => {
                if let Some((_, buf)) = current.as_mut() {
                    buf.push_str(text);
                }
            }
            Node::End(b"Id") if current.as_ref().is_some_and(|(d, _)| *d == depth) => {
                if let Some((_, id)) = current.take() {
                    let id = id.trim();
                    if !id.is_empty() {
                        ids.push(id.to_string());
                    }
                }
            }
            _ => {}
        }
        Ok(())
    })?;

    Ok(ids)
}

/// Parse an efetch response into papers, classifying every author affiliation.
pub fn parse_papers(xml: &str, classifier: &AffiliationClassifier) -> FetchResult<Vec<Paper>> {
    let mut collector = PaperCollector::new(classifier);
    walk(xml, |node, depth| {
        collector.visit(node, depth);
        Ok(())
    })?;
    Ok(collector.papers)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Pmid,
    Title,
    Year,
    LastName,
    ForeName,
    Affiliation,
}

#[derive(Debug)]
struct Capture {
    field: Field,
    depth: usize,
    text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PubDate {
    NotSeen,
    Open(usize),
    Closed,
}

#[derive(Debug, Default)]
struct AuthorState {
    depth: usize,
    last_name: Option<String>,
    fore_name: Option<String>,
    affiliation: Option<String>,
}

#[derive(Debug)]
struct ArticleState {
    depth: usize,
    pmid: Option<String>,
    title: Option<String>,
    pub_date: PubDate,
    year: Option<String>,
    author: Option<AuthorState>,
    capture: Option<Capture>,
    builder: PaperBuilder,
}

impl ArticleState {
    fn new(depth: usize) -> Self {
        Self {
            depth,
            pmid: None,
            title: None,
            pub_date: PubDate::NotSeen,
            year: None,
            author: None,
            capture: None,
            builder: PaperBuilder::new(String::new()),
        }
    }

    /// Which field, if any, an element opening at `depth` starts capturing.
    fn field_for(&self, name: &[u8], depth: usize) -> Option<Field> {
        if self.capture.is_some() {
            return None;
        }
        match name {
            b"PMID" if self.pmid.is_none() => Some(Field::Pmid),
            b"ArticleTitle" if self.title.is_none() => Some(Field::Title),
            b"Year" if self.year.is_none() && self.pub_date == PubDate::Open(depth - 1) => {
                Some(Field::Year)
            }
            _ => {
                let author = self.author.as_ref()?;
                let is_child = depth == author.depth + 1;
                match name {
                    b"LastName" if is_child && author.last_name.is_none() => Some(Field::LastName),
                    b"ForeName" if is_child && author.fore_name.is_none() => Some(Field::ForeName),
                    b"Affiliation" if author.affiliation.is_none() => Some(Field::Affiliation),
                    _ => None,
                }
            }
        }
    }

    fn commit(&mut self, capture: Capture) {
        let Capture { field, text, .. } = capture;
        match field {
            Field::Pmid => self.pmid = Some(text.trim().to_string()),
            Field::Title => self.title = Some(text),
            Field::Year => self.year = Some(text.trim().to_string()),
            Field::LastName | Field::ForeName | Field::Affiliation => {
                if let Some(author) = self.author.as_mut() {
                    match field {
                        Field::LastName => author.last_name = Some(text),
                        Field::ForeName => author.fore_name = Some(text),
                        _ => author.affiliation = Some(text),
                    }
                }
            }
        }
    }

    fn finish_author(&mut self, author: AuthorState, classifier: &AffiliationClassifier) {
        let affiliation = author.affiliation.unwrap_or_default();
        if affiliation.is_empty() {
            return;
        }

        if classifier.is_non_academic(&affiliation) {
            let name = format!(
                "{} {}",
                author.fore_name.unwrap_or_default(),
                author.last_name.unwrap_or_default()
            );
            self.builder.push_non_academic(name.trim(), affiliation.as_str());
        }

        if affiliation.contains('@') && !self.builder.has_email() {
            self.builder.offer_email(extract_email(&affiliation));
        }
    }

    fn finish(self) -> Paper {
        let pmid = self.pmid.unwrap_or_default();
        if pmid.is_empty() {
            tracing::warn!(title = ?self.title, "Article without a PMID, keeping it with an empty id");
        }

        if self.year.as_deref().is_none_or(str::is_empty) {
            tracing::debug!(pmid = %pmid, "No publication year, using \"Unknown\"");
        }

        self.builder
            .pubmed_id(pmid)
            .title(self.title.unwrap_or_default())
            .publication_date(self.year.unwrap_or_default())
            .build()
    }
}

struct PaperCollector<'c> {
    classifier: &'c AffiliationClassifier,
    article: Option<ArticleState>,
    papers: Vec<Paper>,
}

impl<'c> PaperCollector<'c> {
    fn new(classifier: &'c AffiliationClassifier) -> Self {
        Self { classifier, article: None, papers: Vec::new() }
    }

    fn visit(&mut self, node: Node<'_>, depth: usize) {
        match node {
            Node::Start(name) => self.start(name, depth),
            Node::Text(text) => {
                if let Some(capture) = self.article.as_mut().and_then(|a| a.capture.as_mut()) {
                    capture.text.push_str(text);
                }
            }
            Node::End(name) => self.end(name, depth),
        }
    }

    fn start(&mut self, name: &[u8], depth: usize) {
        let Some(article) = self.article.as_mut() else {
            if name == b"PubmedArticle" {
                self.article = Some(ArticleState::new(depth));
            }
            return;
        };

        if let Some(field) = article.field_for(name, depth) {
            article.capture = Some(Capture { field, depth, text: String::new() });
        }

        match name {
            b"PubDate" if article.pub_date == PubDate::NotSeen => {
                article.pub_date = PubDate::Open(depth);
            }
            b"Author" if article.author.is_none() => {
                article.author = Some(AuthorState { depth, ..AuthorState::default() });
            }
            _ => {}
        }
    }

    fn end(&mut self, name: &[u8], depth: usize) {
        let Some(article) = self.article.as_mut() else {
            return;
        };

        if article.capture.as_ref().is_some_and(|c| c.depth == depth) {
            if let Some(capture) = article.capture.take() {
                article.commit(capture);
            }
        }

        match name {
            b"PubDate" if article.pub_date == PubDate::Open(depth) => {
                article.pub_date = PubDate::Closed;
            }
            b"Author" if article.author.as_ref().is_some_and(|a| a.depth == depth) => {
                if let Some(author) = article.author.take() {
                    article.finish_author(author, self.classifier);
                }
            }
            b"PubmedArticle" if article.depth == depth => {
                if let Some(article) = self.article.take() {
                    let paper = article.finish();
                    tracing::debug!(
                        pmid = %paper.pubmed_id(),
                        non_academic = paper.non_academic_authors().len(),
                        email = ?paper.corresponding_author_email(),
                        "Parsed paper"
                    );
                    self.papers.push(paper);
                }
            }
            _ => {}
        }
    }
}
