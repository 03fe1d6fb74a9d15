use crate::bunny::paths::api_url;
use crate::bunny::Region;
use crate::error::{UploadError, UploadResult};
use http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Body, Client};
use std::path::Path;
use tokio_util::io::ReaderStream;
use tracing::debug;

/// 认证请求头名称
pub const ACCESS_KEY_HEADER: &str = "AccessKey";

/// 上传请求的内容类型
pub const OCTET_STREAM: &str = "application/octet-stream";

/// 错误响应体在错误信息中保留的最大长度
const ERROR_BODY_LIMIT: usize = 512;

/// BunnyCDN 存储 API 客户端
#[derive(Debug, Clone)]
pub struct StorageClient {
    http: Client,
    endpoint: Option<String>,
}

impl StorageClient {
    /// 创建存储客户端。
    ///
    /// # 参数
    ///
    /// * `http` - 共享的 HTTP 客户端，使用其默认超时。
    /// * `endpoint` - 可选的基础 URL，设置后替换 `https://{区域主机名}`。
    pub fn new(http: Client, endpoint: Option<String>) -> Self {
        Self { http, endpoint }
    }

    /// 区域对应的存储 API 基础地址
    pub fn base_url(&self, region: Region) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint.clone(),
            None => format!("https://{}", region.hostname()),
        }
    }

    /// 远程文件的完整上传地址
    pub fn upload_url(&self, region: Region, storage_zone_name: &str, remote_full_path: &str) -> String {
        api_url(&self.base_url(region), storage_zone_name, remote_full_path)
    }

    /// 以 PUT 请求把本地文件上传到指定地址。
    ///
    /// 请求体直接从磁盘流式读取，并带上文件大小作为 `Content-Length`。
    ///
    /// # 参数
    ///
    /// * `url` - 上传地址。
    /// * `access_key` - 存储区访问密钥。
    /// * `path` - 本地文件路径。
    ///
    /// # Errors
    ///
    /// 本地文件无法读取、传输失败或响应状态码不是 2xx 时返回错误。
    pub async fn put_file(&self, url: &str, access_key: &str, path: &Path) -> UploadResult<()> {
        let local_file_error = |source| UploadError::LocalFile {
            path: path.to_path_buf(),
            source,
        };

        let file = tokio::fs::File::open(path).await.map_err(local_file_error)?;
        let length = file.metadata().await.map_err(local_file_error)?.len();

        debug!("PUT {} ({} bytes)", url, length);

        let response = self
            .http
            .put(url)
            .header(ACCESS_KEY_HEADER, access_key)
            .header(CONTENT_TYPE, OCTET_STREAM)
            .header(CONTENT_LENGTH, length)
            .body(Body::wrap_stream(ReaderStream::new(file)))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let mut body = response.text().await.unwrap_or_default();
        if body.len() > ERROR_BODY_LIMIT {
            let mut cut = ERROR_BODY_LIMIT;
            while !body.is_char_boundary(cut) {
                cut -= 1;
            }
            body.truncate(cut);
        }
        Err(UploadError::Status { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_bytes, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn write_video(dir: &Path, bytes: &[u8]) -> std::path::PathBuf {
        let file = dir.join("clip.mp4");
        std::fs::write(&file, bytes).unwrap();
        file
    }

    #[test]
    fn test_upload_url_uses_region_hostname() {
        let client = StorageClient::new(Client::new(), None);
        assert_eq!(
            client.upload_url(Region::Sydney, "zone", "videos/a.mp4"),
            "https://syd.storage.bunnycdn.com/zone/videos/a.mp4"
        );
    }

    #[test]
    fn test_upload_url_for_every_region_label() {
        let client = StorageClient::new(Client::new(), None);
        let expected = [
            ("Falkenstein", "https://storage.bunnycdn.com/myzone/videos/clip1.mp4"),
            ("New York", "https://ny.storage.bunnycdn.com/myzone/videos/clip1.mp4"),
            ("Los Angeles", "https://la.storage.bunnycdn.com/myzone/videos/clip1.mp4"),
            ("Singapore", "https://sg.storage.bunnycdn.com/myzone/videos/clip1.mp4"),
            ("Sydney", "https://syd.storage.bunnycdn.com/myzone/videos/clip1.mp4"),
            ("Tokyo", "https://storage.bunnycdn.com/myzone/videos/clip1.mp4"),
        ];

        for (label, url) in expected {
            let region = Region::from_label_or_default(label);
            assert_eq!(client.upload_url(region, "myzone", "videos/clip1.mp4"), url);
        }
    }

    #[test]
    fn test_endpoint_override_replaces_hostname() {
        let client = StorageClient::new(Client::new(), Some("http://127.0.0.1:9000".into()));
        assert_eq!(
            client.upload_url(Region::NewYork, "zone", "a.mp4"),
            "http://127.0.0.1:9000/zone/a.mp4"
        );
    }

    #[tokio::test]
    async fn test_put_file_sends_headers_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/zone/videos/clip.mp4"))
            .and(header("AccessKey", "secret"))
            .and(header("content-type", "application/octet-stream"))
            .and(header("content-length", "5"))
            .and(body_bytes(b"video".to_vec()))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let file = write_video(dir.path(), b"video");
        let client = StorageClient::new(Client::new(), Some(server.uri()));
        let url = client.upload_url(Region::Falkenstein, "zone", "videos/clip.mp4");

        client.put_file(&url, "secret", &file).await.unwrap();
    }

    #[tokio::test]
    async fn test_put_file_rejects_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let file = write_video(dir.path(), b"video");
        let client = StorageClient::new(Client::new(), Some(server.uri()));
        let url = client.upload_url(Region::Falkenstein, "zone", "clip.mp4");

        match client.put_file(&url, "wrong", &file).await {
            Err(UploadError::Status { status, body }) => {
                assert_eq!(status.as_u16(), 401);
                assert_eq!(body, "Unauthorized");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_put_file_missing_local_file() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let client = StorageClient::new(Client::new(), Some(server.uri()));
        let url = client.upload_url(Region::Falkenstein, "zone", "clip.mp4");
        let result = client
            .put_file(&url, "secret", Path::new("/definitely/not/here.mp4"))
            .await;

        assert!(matches!(result, Err(UploadError::LocalFile { .. })));
    }
}
