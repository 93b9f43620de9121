//! C-ABI wrapper around `artsim-core`.
//!
//! # Overview
//! Exposes the similarity client through `extern "C"` functions so the iOS
//! host can build and parse HTTP requests/responses without linking to
//! Rust's async machinery or serde directly. The host executes the actual
//! round-trip with its own networking stack and feeds the response back,
//! which is why this crate builds `artsim-core` without its `transport`
//! feature.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Per-operation `build_*` / `parse_*` mirrors the core API 1:1.
//! - A single `FfiRequestResult` envelope with `FfiDataTag` + `void* data`
//!   conveys success payloads and errors uniformly. An `Ok` result with tag
//!   `None` is the service's soft failure: the envelope decoded but carried
//!   no data.
//! - Permission classification is exposed as total functions over raw OS
//!   status integers; unrecognized values map to the settings-alert
//!   directive instead of aborting.
//! - The C caller owns all returned pointers and must call the matching
//!   `artsim_free_*` function to release them.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::catch_unwind;

use artsim_core::http::HttpResponse;
use artsim_core::multipart::ImagePart;
use artsim_core::permission::PermissionStatus;

use types::*;

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a new `SimilarityClient` bound to `base_url`.
///
/// Returns null if `base_url` is null or if an internal panic occurs.
/// The caller must free the returned pointer with `artsim_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn artsim_client_new(base_url: *const c_char) -> *mut FfiSimilarityClient {
    catch_unwind(|| {
        if base_url.is_null() {
            return std::ptr::null_mut();
        }
        let url = unsafe { CStr::from_ptr(base_url) }.to_str().unwrap_or("");
        let client = artsim_core::SimilarityClient::new(url);
        Box::into_raw(Box::new(FfiSimilarityClient { inner: client }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a `SimilarityClient` created by `artsim_client_new`. Safe to call
/// with null.
#[unsafe(no_mangle)]
pub extern "C" fn artsim_client_free(client: *mut FfiSimilarityClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Build request functions
// ---------------------------------------------------------------------------

/// Build the multipart HTTP request for uploading one image.
///
/// `bytes` may be null only when `bytes_len` is 0 — empty images are legal
/// and forwarded as-is. Returns null if `client` or `file_name` is null, or
/// if `bytes` is null with a nonzero length.
/// The caller must free the returned pointer with `artsim_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn artsim_build_upload_image(
    client: *const FfiSimilarityClient,
    bytes: *const u8,
    bytes_len: u32,
    file_name: *const c_char,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() || file_name.is_null() {
            return std::ptr::null_mut();
        }
        if bytes.is_null() && bytes_len != 0 {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let image_bytes = if bytes_len == 0 {
            Vec::new()
        } else {
            unsafe { std::slice::from_raw_parts(bytes, bytes_len as usize) }.to_vec()
        };
        let file_name = unsafe { CStr::from_ptr(file_name) }.to_str().unwrap_or("");
        let part = ImagePart::jpeg(image_bytes, file_name);
        let req = client.inner.build_upload_image(&part);
        FfiHttpRequest::from_core(req)
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Build the HTTP request for listing all stored images.
///
/// Returns null if `client` is null.
/// The caller must free the returned pointer with `artsim_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn artsim_build_list_images(
    client: *const FfiSimilarityClient,
) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let req = client.inner.build_list_images();
        FfiHttpRequest::from_core(req)
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Parse response functions
// ---------------------------------------------------------------------------

/// Convert an `FfiHttpResponse` to a core `HttpResponse`.
fn ffi_response_to_core(resp: &FfiHttpResponse) -> HttpResponse {
    let body = if resp.body.is_null() || resp.body_len == 0 {
        Vec::new()
    } else {
        unsafe { std::slice::from_raw_parts(resp.body, resp.body_len as usize) }.to_vec()
    };
    HttpResponse {
        status: resp.status,
        headers: Vec::new(),
        body,
    }
}

/// Parse an HTTP response from an upload-image request.
///
/// Returns a result with `data_tag = Report` on success; an envelope that
/// decoded without a `data` field yields `Ok` with `data_tag = None`.
#[unsafe(no_mangle)]
pub extern "C" fn artsim_parse_upload_image(
    client: *const FfiSimilarityClient,
    response: *const FfiHttpResponse,
) -> *mut FfiRequestResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiRequestResult::null_arg("client");
        }
        if response.is_null() {
            return FfiRequestResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        let core_resp = ffi_response_to_core(resp);
        match client.inner.parse_upload_image(core_resp) {
            Ok(reply) => FfiRequestResult::from_report_reply(reply),
            Err(e) => FfiRequestResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiRequestResult::panic("panic in artsim_parse_upload_image"))
}

/// Parse an HTTP response from a list-images request.
///
/// Returns a result with `data_tag = ImageList` on success; an envelope that
/// decoded without a `data` field yields `Ok` with `data_tag = None`.
#[unsafe(no_mangle)]
pub extern "C" fn artsim_parse_list_images(
    client: *const FfiSimilarityClient,
    response: *const FfiHttpResponse,
) -> *mut FfiRequestResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiRequestResult::null_arg("client");
        }
        if response.is_null() {
            return FfiRequestResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        let core_resp = ffi_response_to_core(resp);
        match client.inner.parse_list_images(core_resp) {
            Ok(reply) => FfiRequestResult::from_image_list_reply(reply),
            Err(e) => FfiRequestResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiRequestResult::panic("panic in artsim_parse_list_images"))
}

// ---------------------------------------------------------------------------
// Permission classification
// ---------------------------------------------------------------------------

/// Classify a raw photo-library authorization value into the next picker
/// step. Total over all inputs; unrecognized values direct the user to
/// system settings instead of aborting.
#[unsafe(no_mangle)]
pub extern "C" fn artsim_photo_permission_directive(raw: i32) -> FfiPickerDirective {
    catch_unwind(|| PermissionStatus::from_photo_library_raw(raw).directive().into())
        .unwrap_or(FfiPickerDirective::ShowSettingsAlert)
}

/// Classify a raw camera authorization value into the next picker step.
/// Total over all inputs.
#[unsafe(no_mangle)]
pub extern "C" fn artsim_camera_permission_directive(raw: i32) -> FfiPickerDirective {
    catch_unwind(|| PermissionStatus::from_camera_raw(raw).directive().into())
        .unwrap_or(FfiPickerDirective::ShowSettingsAlert)
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiHttpRequest` returned by any `artsim_build_*` function.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn artsim_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        if !req.path.is_null() {
            drop(unsafe { CString::from_raw(req.path) });
        }
        if !req.body.is_null() && req.body_len > 0 {
            let slice = unsafe {
                std::slice::from_raw_parts_mut(req.body, req.body_len as usize)
            };
            drop(unsafe { Box::from_raw(slice as *mut [u8]) });
        }
        if !req.headers.is_null() && req.headers_len > 0 {
            let headers = unsafe {
                Vec::from_raw_parts(req.headers, req.headers_len as usize, req.headers_len as usize)
            };
            for h in headers {
                if !h.key.is_null() {
                    drop(unsafe { CString::from_raw(h.key) });
                }
                if !h.value.is_null() {
                    drop(unsafe { CString::from_raw(h.value) });
                }
            }
        }
    });
}

/// Free an `FfiRequestResult` returned by any `artsim_parse_*` function.
/// Safe to call with null. Uses `data_tag` to determine what `data`
/// points to.
#[unsafe(no_mangle)]
pub extern "C" fn artsim_free_result(result: *mut FfiRequestResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        if !result.error_message.is_null() {
            drop(unsafe { CString::from_raw(result.error_message) });
        }
        if !result.data.is_null() {
            match result.data_tag {
                FfiDataTag::Report => {
                    let report =
                        unsafe { Box::from_raw(result.data as *mut FfiSimilarityReport) };
                    if !report.image_name.is_null() {
                        drop(unsafe { CString::from_raw(report.image_name) });
                    }
                    if !report.matches.is_null() && report.matches_len > 0 {
                        let matches = unsafe {
                            Vec::from_raw_parts(
                                report.matches,
                                report.matches_len as usize,
                                report.matches_len as usize,
                            )
                        };
                        for m in matches {
                            if !m.url.is_null() {
                                drop(unsafe { CString::from_raw(m.url) });
                            }
                        }
                    }
                }
                FfiDataTag::ImageList => {
                    let list = unsafe { Box::from_raw(result.data as *mut FfiImageList) };
                    if !list.items.is_null() && list.len > 0 {
                        let items = unsafe {
                            Vec::from_raw_parts(list.items, list.len as usize, list.len as usize)
                        };
                        for item in items {
                            if !item.image_name.is_null() {
                                drop(unsafe { CString::from_raw(item.image_name) });
                            }
                            if !item.url.is_null() {
                                drop(unsafe { CString::from_raw(item.url) });
                            }
                        }
                    }
                }
                FfiDataTag::None => {}
            }
        }
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn artsim_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { CString::from_raw(s) });
        });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
