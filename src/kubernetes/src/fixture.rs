pub mod source {
    use http::{Request, Response};
    use hyper::Body;
    use kube::{discovery::ApiResource, Client, Resource, ResourceExt};

    use crate::{client::Clients, source::SourceOptions};

    pub type ApiServerHandle = tower_test::mock::Handle<Request<Body>, Response<Body>>;
    pub struct ApiServerVerifier(pub ApiServerHandle);

    pub async fn timeout_after_1s(handle: tokio::task::JoinHandle<()>) {
        tokio::time::timeout(std::time::Duration::from_secs(1), handle)
            .await
            .expect("timeout on mock apiserver")
            .expect("scenario succeeded")
    }

    impl Clients {
        pub fn test() -> (Self, ApiServerVerifier) {
            Self::test_with_namespace("default")
        }

        pub fn test_with_namespace(ns: &str) -> (Self, ApiServerVerifier) {
            let (mock_service, handle) = tower_test::mock::pair::<Request<Body>, Response<Body>>();
            let mock_client = Client::new(mock_service, ns);
            (Self::new(mock_client), ApiServerVerifier(handle))
        }
    }

    fn base_uri<T: Resource<DynamicType = ()>>() -> String {
        let api_resource = ApiResource::erase::<T>(&());
        if api_resource.group.is_empty() {
            format!("/api/{}", api_resource.api_version)
        } else {
            format!("/apis/{}", api_resource.api_version)
        }
    }

    pub fn post_uri<T: Resource<DynamicType = ()>>(res: &T) -> String {
        let api_resource = ApiResource::erase::<T>(&());
        match res.namespace() {
            Some(ns) => format!(
                "{}/namespaces/{}/{}?",
                base_uri::<T>(),
                ns,
                api_resource.plural,
            ),
            None => format!("{}/{}?", base_uri::<T>(), api_resource.plural),
        }
    }

    pub fn assert_resource_request<T: Resource<DynamicType = ()>>(
        request: &Request<Body>,
        res: &T,
        method: http::Method,
    ) {
        assert_eq!(request.method(), method);
        let uri = match method {
            http::Method::POST => post_uri(res),
            _ => panic!("unimplemented method"),
        };
        assert_eq!(request.uri().to_string(), uri);
    }

    pub fn api_server_response_conflict<T: Resource<DynamicType = ()>>(res: &T) -> String {
        let api_resource = ApiResource::erase::<T>(&());
        format!(
            r#"{{
  "kind": "Status",
  "apiVersion": "v1",
  "metadata": {{}},
  "status": "Failure",
  "message": "{}.{} \"{}\" already exists",
  "reason": "AlreadyExists",
  "details": {{
    "name": "{}",
    "group": "{}",
    "kind": "{}"
  }},
  "code": 409
}}"#,
            api_resource.plural,
            api_resource.group,
            res.name_any(),
            res.name_any(),
            api_resource.group,
            api_resource.plural,
        )
    }

    pub fn test_source_options() -> SourceOptions {
        SourceOptions {
            name: "s".to_string(),
            address: "https://vc.local".to_string(),
            secret_ref: "cred".to_string(),
            sink_uri: "http://sink".to_string(),
            ..Default::default()
        }
    }
}
