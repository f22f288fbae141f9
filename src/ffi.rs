//! C-ABI FFI bindings for cross-language integration.
//!
//! This module provides a C-compatible API for using xmindmd from other
//! languages such as C#, Python, and Node.js.

use std::ffi::{c_char, CStr, CString};
use std::path::Path;
use std::ptr;

use crate::render::{JsonFormat, RenderOptions, Style};
use crate::{parse_file_with_options, render, ParseOptions};

/// Result structure returned by FFI functions.
#[repr(C)]
pub struct XmindMdResult {
    /// Whether the operation succeeded.
    pub success: bool,
    /// The result data (null if failed). Must be freed with `xmindmd_free_string`.
    pub data: *mut c_char,
    /// Error message (null if succeeded). Must be freed with `xmindmd_free_string`.
    pub error: *mut c_char,
}

impl XmindMdResult {
    fn success(data: String) -> Self {
        Self {
            success: true,
            data: CString::new(data).unwrap_or_default().into_raw(),
            error: ptr::null_mut(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: ptr::null_mut(),
            error: CString::new(message.into()).unwrap_or_default().into_raw(),
        }
    }

    fn from_result(result: crate::Result<String>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(e) => Self::error(e.to_string()),
        }
    }
}

/// Options for conversion via FFI.
#[repr(C)]
pub struct XmindMdOptions {
    /// Emit DokuWiki instead of Markdown.
    pub dokuwiki: bool,
    /// Number of heading levels.
    pub header_depth: u32,
    /// Enable lenient decoding mode.
    pub lenient: bool,
}

impl Default for XmindMdOptions {
    fn default() -> Self {
        Self {
            dokuwiki: false,
            header_depth: 2,
            lenient: true,
        }
    }
}

impl XmindMdOptions {
    fn parse_options(&self) -> ParseOptions {
        if self.lenient {
            ParseOptions::new().lenient()
        } else {
            ParseOptions::new()
        }
    }

    fn render_options(&self) -> RenderOptions {
        let style = if self.dokuwiki {
            Style::DokuWiki
        } else {
            Style::Markdown
        };
        RenderOptions::new()
            .with_style(style)
            .with_header_depth(self.header_depth as usize)
    }
}

unsafe fn path_arg<'a>(path: *const c_char) -> Result<&'a str, XmindMdResult> {
    if path.is_null() {
        return Err(XmindMdResult::error("Path cannot be null"));
    }
    CStr::from_ptr(path)
        .to_str()
        .map_err(|_| XmindMdResult::error("Invalid UTF-8 path"))
}

fn render_internal(path: &Path, options: &XmindMdOptions) -> crate::Result<render::RenderResult> {
    let workbook = parse_file_with_options(path, options.parse_options())?;
    Ok(render::render(workbook.root()?, &options.render_options()))
}

/// Convert an XMind file to the linear Markdown document.
///
/// # Safety
///
/// The `path` must be a valid null-terminated UTF-8 string.
/// The returned result must be freed with `xmindmd_free_result`.
#[no_mangle]
pub unsafe extern "C" fn xmindmd_to_markdown(path: *const c_char) -> XmindMdResult {
    xmindmd_to_document_with_options(path, XmindMdOptions::default())
}

/// Convert an XMind file to the linear document with options.
///
/// # Safety
///
/// The `path` must be a valid null-terminated UTF-8 string.
/// The returned result must be freed with `xmindmd_free_result`.
#[no_mangle]
pub unsafe extern "C" fn xmindmd_to_document_with_options(
    path: *const c_char,
    options: XmindMdOptions,
) -> XmindMdResult {
    let path_str = match path_arg(path) {
        Ok(s) => s,
        Err(e) => return e,
    };
    XmindMdResult::from_result(render_internal(Path::new(path_str), &options).map(|r| r.document))
}

/// Convert an XMind file to the reveal.js slide deck.
///
/// The data is an empty string when the outline has no slide group.
///
/// # Safety
///
/// The `path` must be a valid null-terminated UTF-8 string.
/// The returned result must be freed with `xmindmd_free_result`.
#[no_mangle]
pub unsafe extern "C" fn xmindmd_to_slides(
    path: *const c_char,
    options: XmindMdOptions,
) -> XmindMdResult {
    let path_str = match path_arg(path) {
        Ok(s) => s,
        Err(e) => return e,
    };
    XmindMdResult::from_result(render_internal(Path::new(path_str), &options).map(|r| r.deck))
}

/// Dump the decoded outline of an XMind file as JSON.
///
/// # Safety
///
/// The `path` must be a valid null-terminated UTF-8 string.
/// The returned result must be freed with `xmindmd_free_result`.
#[no_mangle]
pub unsafe extern "C" fn xmindmd_to_json(path: *const c_char, pretty: bool) -> XmindMdResult {
    let path_str = match path_arg(path) {
        Ok(s) => s,
        Err(e) => return e,
    };

    let format = if pretty {
        JsonFormat::Pretty
    } else {
        JsonFormat::Compact
    };

    let result = parse_file_with_options(path_str, ParseOptions::new().lenient())
        .and_then(|workbook| render::to_json(&workbook, format));
    XmindMdResult::from_result(result)
}

/// Get the number of sheets of an XMind file.
///
/// # Safety
///
/// The `path` must be a valid null-terminated UTF-8 string.
/// Returns -1 on error.
#[no_mangle]
pub unsafe extern "C" fn xmindmd_get_sheet_count(path: *const c_char) -> i32 {
    let path_str = match path_arg(path) {
        Ok(s) => s,
        Err(e) => {
            xmindmd_free_result(e);
            return -1;
        }
    };

    match parse_file_with_options(path_str, ParseOptions::new().lenient()) {
        Ok(workbook) => workbook.sheet_count() as i32,
        Err(_) => -1,
    }
}

/// Check if a file is an XMind document.
///
/// # Safety
///
/// The `path` must be a valid null-terminated UTF-8 string.
#[no_mangle]
pub unsafe extern "C" fn xmindmd_is_xmind(path: *const c_char) -> bool {
    if path.is_null() {
        return false;
    }

    match CStr::from_ptr(path).to_str() {
        Ok(s) => crate::detect::is_xmind(Path::new(s)),
        Err(_) => false,
    }
}

/// Free a result returned by any xmindmd function.
///
/// # Safety
///
/// The `result` must have been returned by an xmindmd function.
/// This function should only be called once per result.
#[no_mangle]
pub unsafe extern "C" fn xmindmd_free_result(result: XmindMdResult) {
    if !result.data.is_null() {
        drop(CString::from_raw(result.data));
    }
    if !result.error.is_null() {
        drop(CString::from_raw(result.error));
    }
}

/// Free a string allocated by xmindmd.
///
/// # Safety
///
/// The `ptr` must have been allocated by xmindmd.
/// This function should only be called once per pointer.
#[no_mangle]
pub unsafe extern "C" fn xmindmd_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

/// Get the version of the xmindmd library.
///
/// The returned string is statically allocated and should not be freed.
#[no_mangle]
pub extern "C" fn xmindmd_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}
