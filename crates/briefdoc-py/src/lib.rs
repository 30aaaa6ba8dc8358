//! Python bindings for the BriefDoc parser.

use briefdoc_core::{
    Block, Diagnostic as CoreDiagnostic, DiagnosticKind as CoreDiagnosticKind, Document, Inline,
    ListKind as CoreListKind, ParseResult as CoreParseResult, Parser as CoreParser,
};
use pyo3::prelude::*;
use pyo3::types::PyList;

// ============================================================================
// Diagnostics
// ============================================================================

/// Degraded-input category.
#[pyclass(frozen, eq, eq_int, name = "DiagnosticKind")]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PyDiagnosticKind {
    UnterminatedFence,
    RaggedTableRow,
    HeadingLevelClamped,
}

impl From<CoreDiagnosticKind> for PyDiagnosticKind {
    fn from(k: CoreDiagnosticKind) -> Self {
        match k {
            CoreDiagnosticKind::UnterminatedFence => PyDiagnosticKind::UnterminatedFence,
            CoreDiagnosticKind::RaggedTableRow => PyDiagnosticKind::RaggedTableRow,
            CoreDiagnosticKind::HeadingLevelClamped => PyDiagnosticKind::HeadingLevelClamped,
        }
    }
}

/// Something the parser papered over.
#[pyclass(frozen, get_all, name = "Diagnostic")]
#[derive(Clone)]
pub struct PyDiagnostic {
    pub kind: PyDiagnosticKind,
    pub line: usize,
    pub message: String,
}

#[pymethods]
impl PyDiagnostic {
    fn __repr__(&self) -> String {
        format!("Diagnostic({:?}, line={})", self.kind, self.line)
    }

    fn __str__(&self) -> String {
        format!("{} at line {}", self.message, self.line)
    }
}

impl From<CoreDiagnostic> for PyDiagnostic {
    fn from(d: CoreDiagnostic) -> Self {
        PyDiagnostic {
            kind: d.kind.into(),
            line: d.line,
            message: d.message,
        }
    }
}

// ============================================================================
// Block types
// ============================================================================

/// Section heading, level 1-6.
#[pyclass(frozen, get_all, name = "Heading")]
pub struct PyHeading {
    pub level: u8,
    pub content: PyObject,
}

/// One line of prose.
#[pyclass(frozen, get_all, name = "Paragraph")]
pub struct PyParagraph {
    pub content: PyObject,
}

/// List kind.
#[pyclass(frozen, eq, eq_int, name = "ListKind")]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PyListKind {
    Ordered,
    Unordered,
}

impl From<CoreListKind> for PyListKind {
    fn from(k: CoreListKind) -> Self {
        match k {
            CoreListKind::Ordered => PyListKind::Ordered,
            CoreListKind::Unordered => PyListKind::Unordered,
        }
    }
}

/// List item with its indentation depth.
#[pyclass(frozen, get_all, name = "ListItem")]
pub struct PyListItem {
    pub content: PyObject,
    pub depth: usize,
}

/// Ordered or unordered list.
#[pyclass(frozen, get_all, name = "List")]
#[allow(non_camel_case_types)]
pub struct PyList_ {
    pub kind: PyListKind,
    pub items: PyObject,
}

/// Pipe table. `headers` is a list of cells, `rows` a list of cell lists.
#[pyclass(frozen, get_all, name = "Table")]
pub struct PyTable {
    pub headers: PyObject,
    pub rows: PyObject,
}

/// Fenced code, lines verbatim.
#[pyclass(frozen, get_all, name = "CodeBlock")]
pub struct PyCodeBlock {
    pub language: Option<String>,
    pub lines: Vec<String>,
}

/// Quoted text.
#[pyclass(frozen, get_all, name = "Blockquote")]
pub struct PyBlockquote {
    pub content: PyObject,
}

/// Horizontal rule.
#[pyclass(frozen, name = "HorizontalRule")]
pub struct PyHorizontalRule {}

/// Collapsed run of blank lines.
#[pyclass(frozen, name = "Spacer")]
pub struct PySpacer {}

// ============================================================================
// Inline types
// ============================================================================

#[pyclass(frozen, get_all, name = "Text")]
pub struct PyText {
    pub content: String,
}

#[pyclass(frozen, get_all, name = "Bold")]
pub struct PyBold {
    pub content: PyObject,
}

#[pyclass(frozen, get_all, name = "Italic")]
pub struct PyItalic {
    pub content: PyObject,
}

#[pyclass(frozen, get_all, name = "Code")]
pub struct PyCode {
    pub content: String,
}

#[pyclass(frozen, get_all, name = "Link")]
pub struct PyLink {
    pub label: String,
    pub url: String,
}

// ============================================================================
// Conversion
// ============================================================================

fn convert_inlines(py: Python<'_>, inlines: Vec<Inline>) -> PyResult<PyObject> {
    let list = PyList::empty(py);
    for inline in inlines {
        list.append(convert_inline(py, inline)?)?;
    }
    Ok(list.into())
}

fn convert_inline(py: Python<'_>, inline: Inline) -> PyResult<PyObject> {
    let obj = match inline {
        Inline::Text(content) => Py::new(py, PyText { content })?.into_any(),
        Inline::Bold(inner) => Py::new(
            py,
            PyBold {
                content: convert_inlines(py, inner)?,
            },
        )?
        .into_any(),
        Inline::Italic(inner) => Py::new(
            py,
            PyItalic {
                content: convert_inlines(py, inner)?,
            },
        )?
        .into_any(),
        Inline::Code(content) => Py::new(py, PyCode { content })?.into_any(),
        Inline::Link { label, url } => Py::new(py, PyLink { label, url })?.into_any(),
    };
    Ok(obj)
}

fn convert_cells(py: Python<'_>, cells: Vec<Vec<Inline>>) -> PyResult<PyObject> {
    let list = PyList::empty(py);
    for cell in cells {
        list.append(convert_inlines(py, cell)?)?;
    }
    Ok(list.into())
}

fn convert_blocks(py: Python<'_>, blocks: Vec<Block>) -> PyResult<PyObject> {
    let list = PyList::empty(py);
    for block in blocks {
        list.append(convert_block(py, block)?)?;
    }
    Ok(list.into())
}

fn convert_block(py: Python<'_>, block: Block) -> PyResult<PyObject> {
    let obj = match block {
        Block::Heading { level, content } => Py::new(
            py,
            PyHeading {
                level,
                content: convert_inlines(py, content)?,
            },
        )?
        .into_any(),
        Block::Paragraph { content } => Py::new(
            py,
            PyParagraph {
                content: convert_inlines(py, content)?,
            },
        )?
        .into_any(),
        Block::List { kind, items } => {
            let list = PyList::empty(py);
            for item in items {
                list.append(Py::new(
                    py,
                    PyListItem {
                        content: convert_inlines(py, item.content)?,
                        depth: item.depth,
                    },
                )?)?;
            }
            Py::new(
                py,
                PyList_ {
                    kind: kind.into(),
                    items: list.into(),
                },
            )?
            .into_any()
        }
        Block::Table { headers, rows } => {
            let body = PyList::empty(py);
            for row in rows {
                body.append(convert_cells(py, row)?)?;
            }
            Py::new(
                py,
                PyTable {
                    headers: convert_cells(py, headers)?,
                    rows: body.into(),
                },
            )?
            .into_any()
        }
        Block::CodeBlock { language, lines } => {
            Py::new(py, PyCodeBlock { language, lines })?.into_any()
        }
        Block::Blockquote { content } => Py::new(
            py,
            PyBlockquote {
                content: convert_inlines(py, content)?,
            },
        )?
        .into_any(),
        Block::HorizontalRule => Py::new(py, PyHorizontalRule {})?.into_any(),
        Block::Spacer => Py::new(py, PySpacer {})?.into_any(),
    };
    Ok(obj)
}

// ============================================================================
// Document
// ============================================================================

/// A parsed document: a flat list of blocks.
#[pyclass(frozen, name = "Document")]
pub struct PyDocument {
    #[pyo3(get)]
    pub blocks: Py<PyList>,
}

#[pymethods]
impl PyDocument {
    fn __repr__(&self, py: Python<'_>) -> String {
        format!("Document(blocks={})", self.blocks.bind(py).len())
    }

    fn __len__(&self, py: Python<'_>) -> usize {
        self.blocks.bind(py).len()
    }
}

fn convert_document(py: Python<'_>, doc: Document) -> PyResult<PyDocument> {
    let blocks = convert_blocks(py, doc.blocks)?;
    Ok(PyDocument {
        blocks: blocks.downcast_bound::<PyList>(py)?.clone().unbind(),
    })
}

// ============================================================================
// ParseResult
// ============================================================================

/// A document plus the degraded conditions seen while building it.
#[pyclass(frozen, name = "ParseResult")]
pub struct PyParseResult {
    #[pyo3(get)]
    pub document: Py<PyDocument>,
    #[pyo3(get)]
    pub diagnostics: Vec<PyDiagnostic>,
}

#[pymethods]
impl PyParseResult {
    #[getter]
    fn clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    fn __repr__(&self, py: Python<'_>) -> String {
        let blocks = self.document.get().blocks.bind(py).len();
        format!(
            "ParseResult(clean={}, blocks={}, diagnostics={})",
            self.diagnostics.is_empty(),
            blocks,
            self.diagnostics.len()
        )
    }
}

// ============================================================================
// Module functions
// ============================================================================

/// Parse analysis text. Never raises on malformed input.
///
/// Args:
///     input: Text to parse
///     preprocess: Rewrite bold pseudo-headings first (default: True)
///
/// Returns:
///     Document: Parsed document
#[pyfunction]
#[pyo3(signature = (input, preprocess=true), text_signature = "(input, preprocess=True)")]
fn parse(py: Python<'_>, input: &str, preprocess: bool) -> PyResult<PyDocument> {
    let parser = CoreParser::new().with_preprocess(preprocess);
    convert_document(py, parser.parse(input))
}

/// Parse and report degraded input.
///
/// Args:
///     input: Text to parse
///     preprocess: Rewrite bold pseudo-headings first (default: True)
///
/// Returns:
///     ParseResult: Document and diagnostics
#[pyfunction]
#[pyo3(signature = (input, preprocess=true), text_signature = "(input, preprocess=True)")]
fn parse_with_diagnostics(py: Python<'_>, input: &str, preprocess: bool) -> PyResult<PyParseResult> {
    let parser = CoreParser::new().with_preprocess(preprocess);
    let CoreParseResult {
        document,
        diagnostics,
    } = parser.parse_with_diagnostics(input);
    Ok(PyParseResult {
        document: Py::new(py, convert_document(py, document)?)?,
        diagnostics: diagnostics.into_iter().map(PyDiagnostic::from).collect(),
    })
}

// ============================================================================
// Module
// ============================================================================

/// BriefDoc - Resilient parser for AI analysis text.
#[pymodule]
fn pybd(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyDocument>()?;
    m.add_class::<PyParseResult>()?;
    m.add_class::<PyDiagnosticKind>()?;
    m.add_class::<PyDiagnostic>()?;
    m.add_class::<PyHeading>()?;
    m.add_class::<PyParagraph>()?;
    m.add_class::<PyList_>()?;
    m.add_class::<PyListItem>()?;
    m.add_class::<PyListKind>()?;
    m.add_class::<PyTable>()?;
    m.add_class::<PyCodeBlock>()?;
    m.add_class::<PyBlockquote>()?;
    m.add_class::<PyHorizontalRule>()?;
    m.add_class::<PySpacer>()?;
    m.add_class::<PyText>()?;
    m.add_class::<PyBold>()?;
    m.add_class::<PyItalic>()?;
    m.add_class::<PyCode>()?;
    m.add_class::<PyLink>()?;
    m.add_function(wrap_pyfunction!(parse, m)?)?;
    m.add_function(wrap_pyfunction!(parse_with_diagnostics, m)?)?;
    Ok(())
}
