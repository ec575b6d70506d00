// Animal endpoints: genealogy, parent selectors, photo upload.

use reqwest::multipart::{Form, Part};
use serde::Serialize;
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{Genealogia, ParentOption, PhotoUpload, Sexo};

/// Sire and dam candidates for the animal form.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParentOptions {
    pub pais: Vec<ParentOption>,
    pub maes: Vec<ParentOption>,
}

/// Content type accepted by the photo endpoint for a file name.
fn photo_mime(filename: &str) -> Option<&'static str> {
    let ext = filename.rsplit_once('.')?.1.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        _ => None,
    }
}

impl ApiClient {
    /// `GET /api/animais/{id}/genealogia`
    pub async fn genealogia(&self, animal_id: i64) -> Result<Genealogia, Error> {
        self.get(&format!("/api/animais/{animal_id}/genealogia"))
            .await
    }

    /// `GET /api/animais/options/parents?sexo=`; active animals only.
    pub async fn parent_options(&self, sexo: Option<Sexo>) -> Result<Vec<ParentOption>, Error> {
        let params: Vec<(String, String)> = sexo
            .map(|s| vec![("sexo".to_owned(), s.to_string())])
            .unwrap_or_default();
        self.get_with_params("/api/animais/options/parents", &params)
            .await
    }

    /// Males and females for the parent selectors, fetched concurrently.
    pub async fn both_parent_options(&self) -> Result<ParentOptions, Error> {
        let (pais, maes) = tokio::try_join!(
            self.parent_options(Some(Sexo::M)),
            self.parent_options(Some(Sexo::F)),
        )?;
        debug!(pais = pais.len(), maes = maes.len(), "parent options loaded");
        Ok(ParentOptions { pais, maes })
    }

    /// `POST /api/animais/{id}/foto` as multipart field `foto`.
    ///
    /// The backend only accepts JPEG and PNG; other extensions are sent
    /// as `application/octet-stream` and rejected there.
    pub async fn upload_photo(
        &self,
        animal_id: i64,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<PhotoUpload, Error> {
        let mime = photo_mime(filename);
        let form = || {
            let part = Part::bytes(bytes.clone()).file_name(filename.to_owned());
            let part = match mime {
                Some(m) => part
                    .mime_str(m)
                    .unwrap_or_else(|_| Part::bytes(bytes.clone()).file_name(filename.to_owned())),
                None => part,
            };
            Form::new().part("foto", part)
        };
        debug!(animal_id, filename, size = bytes.len(), "uploading photo");
        self.post_multipart(&format!("/api/animais/{animal_id}/foto"), form)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn photo_mime_by_extension() {
        assert_eq!(photo_mime("estrela.JPG"), Some("image/jpeg"));
        assert_eq!(photo_mime("estrela.jpeg"), Some("image/jpeg"));
        assert_eq!(photo_mime("a.b.png"), Some("image/png"));
        assert_eq!(photo_mime("laudo.pdf"), None);
        assert_eq!(photo_mime("sem_extensao"), None);
    }
}
