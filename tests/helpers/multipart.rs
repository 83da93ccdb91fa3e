pub const BOUNDARY: &str = "docqa-test-boundary";

pub fn content_type() -> String {
    format!("multipart/form-data; boundary={}", BOUNDARY)
}

pub fn form_body(file: Option<(&str, &[u8])>, question: Option<&str>) -> Vec<u8> {
    let mut body = Vec::new();

    if let Some((filename, data)) = file {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
                filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }

    if let Some(question) = question {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(b"Content-Disposition: form-data; name=\"question\"\r\n\r\n");
        body.extend_from_slice(question.as_bytes());
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}
