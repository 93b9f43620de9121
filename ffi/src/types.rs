//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointer + length instead of `Vec`,
//! and tagged enums with explicit discriminants. Request bodies are byte
//! pointers, not C strings — a multipart frame around image bytes contains
//! nul bytes. Conversion functions live here to keep `lib.rs` focused on
//! the `extern "C"` surface.

use std::ffi::CString;
use std::os::raw::c_char;

use artsim_core::error::{ErrorKind, Reply, RequestError};
use artsim_core::http::HttpMethod;
use artsim_core::permission::PickerDirective;
use artsim_core::types::{SimilarityReport, StoredImage};

/// Opaque handle to a `SimilarityClient`. C callers receive a pointer to
/// this and pass it back into every FFI function.
pub struct FfiSimilarityClient {
    pub(crate) inner: artsim_core::SimilarityClient,
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
pub enum FfiHttpMethod {
    Get = 0,
    Post = 1,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
            HttpMethod::Post => FfiHttpMethod::Post,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP request described as C-compatible plain data.
///
/// Built by `artsim_build_*` functions. The C caller executes the request
/// and passes the response back through `artsim_parse_*`. `body` is raw
/// bytes of length `body_len`, or null when the request has no body.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub path: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut u8,
    pub body_len: u32,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: artsim_core::HttpRequest) -> *mut Self {
        let path = CString::new(req.path).unwrap().into_raw();

        let (body, body_len) = match req.body {
            Some(bytes) => {
                let len = bytes.len() as u32;
                let boxed = bytes.into_boxed_slice();
                (Box::into_raw(boxed) as *mut u8, len)
            }
            None => (std::ptr::null_mut(), 0),
        };

        let headers_len = req.headers.len() as u32;
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let mut ffi_headers: Vec<FfiHeader> = req
                .headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: CString::new(k).unwrap().into_raw(),
                    value: CString::new(v).unwrap().into_raw(),
                })
                .collect();
            let ptr = ffi_headers.as_mut_ptr();
            std::mem::forget(ffi_headers);
            ptr
        };

        let ffi_req = Box::new(FfiHttpRequest {
            method: req.method.into(),
            path,
            headers,
            headers_len,
            body,
            body_len,
        });
        Box::into_raw(ffi_req)
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The C caller constructs this on the stack after executing an HTTP
/// request, then passes a pointer to an `artsim_parse_*` function. The FFI
/// layer reads but does not free these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const u8,
    pub body_len: u32,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiRequestResult`.
#[repr(C)]
pub enum FfiErrorCode {
    Ok = 0,
    InvalidUrl = 1,
    InvalidResponse = 2,
    Unreachable = 3,
    Custom = 4,
    Panic = 5,
    NullArg = 6,
}

/// Tag that tells `artsim_free_result` what `FfiRequestResult::data`
/// points to.
#[repr(C)]
pub enum FfiDataTag {
    None = 0,
    Report = 1,
    ImageList = 2,
}

/// One gallery image that resembles the upload.
#[repr(C)]
pub struct FfiSimilarMatch {
    pub url: *mut c_char,
    pub similarity_score: f32,
}

/// Result of scoring an uploaded image, exposed to C.
#[repr(C)]
pub struct FfiSimilarityReport {
    pub image_name: *mut c_char,
    pub matches: *mut FfiSimilarMatch,
    pub matches_len: u32,
}

/// One entry of the stored-image listing, exposed to C.
#[repr(C)]
pub struct FfiStoredImage {
    pub image_name: *mut c_char,
    pub url: *mut c_char,
}

/// A list of stored images exposed to C.
#[repr(C)]
pub struct FfiImageList {
    pub items: *mut FfiStoredImage,
    pub len: u32,
}

/// What the picker collaborator should do next, as a C enum.
#[repr(C)]
pub enum FfiPickerDirective {
    RequestAccess = 0,
    PresentPicker = 1,
    ShowSettingsAlert = 2,
}

impl From<PickerDirective> for FfiPickerDirective {
    fn from(d: PickerDirective) -> Self {
        match d {
            PickerDirective::RequestAccess => FfiPickerDirective::RequestAccess,
            PickerDirective::PresentPicker => FfiPickerDirective::PresentPicker,
            PickerDirective::ShowSettingsAlert => FfiPickerDirective::ShowSettingsAlert,
        }
    }
}

/// Result envelope for all parse operations.
///
/// On success `error_code` is `Ok`, `http_status` carries the transport
/// status, and `data` points to the decoded payload (tagged by `data_tag`).
/// `data` may be null with `data_tag = None` even on `Ok` — the service
/// omitted the envelope's `data` field, which callers must treat as a soft
/// failure. On failure `error_code` describes the category, `error_message`
/// is a human-readable C string, and `data` is null.
#[repr(C)]
pub struct FfiRequestResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub data_tag: FfiDataTag,
    pub data: *mut std::ffi::c_void,
}

impl FfiRequestResult {
    /// Build a result from a decoded upload reply. Absent payloads keep
    /// `Ok` with tag `None`.
    pub(crate) fn from_report_reply(reply: Reply<SimilarityReport>) -> *mut Self {
        let (data_tag, data) = match reply.data {
            Some(report) => {
                let matches_len = report.similar_image.len() as u32;
                let mut ffi_matches: Vec<FfiSimilarMatch> = report
                    .similar_image
                    .into_iter()
                    .map(|m| FfiSimilarMatch {
                        url: CString::new(m.url).unwrap().into_raw(),
                        similarity_score: m.similarity_score,
                    })
                    .collect();
                let matches = if ffi_matches.is_empty() {
                    std::ptr::null_mut()
                } else {
                    let ptr = ffi_matches.as_mut_ptr();
                    std::mem::forget(ffi_matches);
                    ptr
                };
                let ffi_report = Box::new(FfiSimilarityReport {
                    image_name: CString::new(report.image_name).unwrap().into_raw(),
                    matches,
                    matches_len,
                });
                (
                    FfiDataTag::Report,
                    Box::into_raw(ffi_report) as *mut std::ffi::c_void,
                )
            }
            None => (FfiDataTag::None, std::ptr::null_mut()),
        };

        let result = Box::new(FfiRequestResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            http_status: reply.status,
            data_tag,
            data,
        });
        Box::into_raw(result)
    }

    /// Build a result from a decoded listing reply. Absent payloads keep
    /// `Ok` with tag `None`.
    pub(crate) fn from_image_list_reply(reply: Reply<Vec<StoredImage>>) -> *mut Self {
        let (data_tag, data) = match reply.data {
            Some(images) => {
                let len = images.len() as u32;
                let mut ffi_images: Vec<FfiStoredImage> = images
                    .into_iter()
                    .map(|image| FfiStoredImage {
                        image_name: CString::new(image.image_name).unwrap().into_raw(),
                        url: CString::new(image.url).unwrap().into_raw(),
                    })
                    .collect();
                let items = if ffi_images.is_empty() {
                    std::ptr::null_mut()
                } else {
                    let ptr = ffi_images.as_mut_ptr();
                    std::mem::forget(ffi_images);
                    ptr
                };
                let ffi_list = Box::new(FfiImageList { items, len });
                (
                    FfiDataTag::ImageList,
                    Box::into_raw(ffi_list) as *mut std::ffi::c_void,
                )
            }
            None => (FfiDataTag::None, std::ptr::null_mut()),
        };

        let result = Box::new(FfiRequestResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            http_status: reply.status,
            data_tag,
            data,
        });
        Box::into_raw(result)
    }

    /// Build an error result from a `RequestError`.
    pub(crate) fn from_error(err: RequestError) -> *mut Self {
        let error_code = match &err.kind {
            ErrorKind::InvalidUrl => FfiErrorCode::InvalidUrl,
            ErrorKind::InvalidResponse => FfiErrorCode::InvalidResponse,
            ErrorKind::Unreachable(_) => FfiErrorCode::Unreachable,
            ErrorKind::Custom(_) => FfiErrorCode::Custom,
        };

        let result = Box::new(FfiRequestResult {
            error_code,
            error_message: CString::new(err.kind.to_string()).unwrap().into_raw(),
            http_status: err.status,
            data_tag: FfiDataTag::None,
            data: std::ptr::null_mut(),
        });
        Box::into_raw(result)
    }

    /// Build an error result for a null argument.
    pub(crate) fn null_arg(name: &str) -> *mut Self {
        let msg = format!("null argument: {name}");
        let result = Box::new(FfiRequestResult {
            error_code: FfiErrorCode::NullArg,
            error_message: CString::new(msg).unwrap().into_raw(),
            http_status: 0,
            data_tag: FfiDataTag::None,
            data: std::ptr::null_mut(),
        });
        Box::into_raw(result)
    }

    /// Build an error result for a caught panic.
    pub(crate) fn panic(msg: &str) -> *mut Self {
        let result = Box::new(FfiRequestResult {
            error_code: FfiErrorCode::Panic,
            error_message: CString::new(msg).unwrap_or_default().into_raw(),
            http_status: 0,
            data_tag: FfiDataTag::None,
            data: std::ptr::null_mut(),
        });
        Box::into_raw(result)
    }
}
