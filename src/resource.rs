use url::Url;

/// Just a wrapper around the base URL of a hosted project and its service api key
#[derive(Clone)]
pub struct Resource {
    url: Url,
    api_key: String,
}

impl Resource {
    pub fn new(url: Url, api_key: String) -> Self {
        Self { url, api_key }
    }

    pub fn url(&self) -> &Url { &self.url }
    pub fn api_key(&self) -> &String { &self.api_key }

    /// Build a new Resource by keeping the same api key, scheme and server from `base` but changing the path part
    pub fn combine(&self, new_path: &str) -> Resource {
        let mut built = (*self).clone();
        built.url.set_path(new_path);
        built
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn combine_swaps_the_path_only() {
        let base = Resource::new(
            Url::parse("https://project.example.com").unwrap(),
            "anon-key".to_string(),
        );
        let data = base.combine("/rest/v1/clients");
        assert_eq!(data.url().as_str(), "https://project.example.com/rest/v1/clients");
        assert_eq!(data.api_key(), "anon-key");
    }
}
