use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::{error, info};

use super::Services;
use crate::core::models::{FileUpload, GeneratedImage, InboundMessage, OutboundReply};
use crate::errors::SlackError;
use crate::utils::text::{sanitize_filename, strip_data_uri_prefix};

const IMAGE_EXTENSION: &str = ".png";

#[must_use]
pub fn acknowledgment_text(prompt: &str) -> String {
    format!("Ok, I'll draw ... {prompt}")
}

/// Caption posted with the image. Threaded requests mention the requester.
#[must_use]
pub fn caption_text(message: &InboundMessage, revised_prompt: &str) -> String {
    if message.thread_ts.is_some() {
        format!("Done. <@{}>\n{revised_prompt}", message.user_id)
    } else {
        revised_prompt.to_string()
    }
}

#[must_use]
pub fn image_filename(prompt: &str) -> String {
    format!("{}{IMAGE_EXTENSION}", sanitize_filename(prompt))
}

/// Decodes the generated image, tolerating a `data:image/...;base64,` prefix.
///
/// # Errors
///
/// Returns an error if the payload is not valid base64.
pub fn decode_image(b64_json: &str) -> Result<Vec<u8>, SlackError> {
    Ok(STANDARD.decode(strip_data_uri_prefix(b64_json).trim())?)
}

fn build_upload(message: &InboundMessage, image: &GeneratedImage) -> Result<FileUpload, SlackError> {
    Ok(FileUpload {
        channel_id: message.channel_id.clone(),
        thread_ts: message.thread_ts.clone(),
        filename: image_filename(&message.text),
        initial_comment: caption_text(message, &image.revised_prompt),
        bytes: decode_image(&image.b64_json)?,
    })
}

/// Draws `message.text` and uploads the result.
///
/// Generation errors propagate to the router. Anything that goes wrong after
/// the image exists is logged and dropped.
///
/// # Errors
///
/// Returns an error if the acknowledgment cannot be posted or generation fails.
pub async fn handle_draw(services: Services<'_>, message: &InboundMessage) -> Result<(), SlackError> {
    let prompt = message.text.as_str();
    let thread_ts = message.thread_ts.as_deref();

    services
        .chat
        .post_reply(&OutboundReply::new(
            &message.channel_id,
            thread_ts,
            acknowledgment_text(prompt),
        ))
        .await?;

    let image = services.assistant.generate_image(prompt).await?;
    info!(
        revised_prompt = %image.revised_prompt,
        "Image generated"
    );

    let upload = match build_upload(message, &image) {
        Ok(upload) => upload,
        Err(e) => {
            error!("Error decoding generated image: {}", e);
            return Ok(());
        }
    };

    if let Err(e) = services.chat.upload_file(&upload).await {
        error!("Error uploading file: {}", e);
    }

    Ok(())
}
