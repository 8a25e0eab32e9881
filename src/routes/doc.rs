use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(info(
    title = "voxpipe-server",
    description = "Voice round-trip API: upload audio, receive a spoken reply",
    version = "0.1.0"
))]
pub struct ApiDoc;

pub fn get_docs() -> utoipa::openapi::OpenApi {
    let mut root = ApiDoc::openapi();
    root.merge(super::health::HealthApi::openapi());
    root.merge(super::transcribe::PipelineApi::openapi());
    root
}
