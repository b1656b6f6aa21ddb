use axum::{
    http::{header, HeaderMap},
    response::Redirect,
    Form,
};

use nitpick_util::sanitize_referer;

use crate::payload::RefererForm;

/// Redirect to the referer from the form, else from the header, else to `/`.
pub fn redirect_back(headers: &HeaderMap, form: Option<Form<RefererForm>>) -> Redirect {
    let from_form = form.and_then(|Form(form)| form.referer);
    let from_header = headers.get(header::REFERER).and_then(|v| v.to_str().ok());
    let target = sanitize_referer(from_form.as_deref().or(from_header));
    Redirect::to(&target)
}
