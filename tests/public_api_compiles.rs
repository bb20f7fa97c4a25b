use std::sync::Arc;

use t5_translator::backends::inference_api::InferenceApiBackend;
use t5_translator::backends::local::{LocalBackend, PipelineServerModel};
use t5_translator::config::TranslatorConfig;
use t5_translator::core::traits::{LocalModel, TranslationBackend};
use t5_translator::languages::{LanguagePrefixTable, resolve_language};
use t5_translator::selftest::{SELF_TEST_CASES, SelfTestReport};
use t5_translator::transport::http::{HttpTransport, RetryPolicy};
use t5_translator::{
    LanguageRequest, Mode, TargetLanguage, Translator, TranslatorBuilder, available_languages,
};

#[test]
fn test_public_api_compiles() {
    let _builder: TranslatorBuilder = Translator::builder();

    let transport = HttpTransport::new(1_000, RetryPolicy::default()).expect("valid transport");
    let model: Arc<dyn LocalModel> = Arc::new(PipelineServerModel::with_transport(
        "http://127.0.0.1:8080/translate",
        transport.clone(),
    ));
    let local: Arc<dyn TranslationBackend> = Arc::new(LocalBackend::new(model));
    let remote: Arc<dyn TranslationBackend> = Arc::new(InferenceApiBackend::with_transport(
        None,
        "https://api-inference.huggingface.co/models/google-t5/t5-base",
        transport,
    ));

    let translator = Translator::builder()
        .with_backend(local)
        .with_backend(remote)
        .build();
    assert!(translator.has_backend(Mode::Local));
    assert!(translator.has_backend(Mode::Remote));

    let _config = TranslatorConfig::default();
    let _request = LanguageRequest::new("Hello", "French", Mode::Remote);
    let _report: Option<SelfTestReport> = None;

    assert_eq!(SELF_TEST_CASES.len(), 4);
    assert_eq!(LanguagePrefixTable::global().entries().len(), 3);
    assert_eq!(resolve_language("ROMANIAN"), Some(TargetLanguage::Romanian));
    assert_eq!(available_languages(), "French, German, Romanian");
}
