//! End-to-end pipeline tests against stub adapters.

use charla_application::TurnOrchestrator;
use charla_core::config::ChatbotConfig;
use charla_core::error::{CharlaError, Result};
use charla_core::generate::{RawCompletion, ReplyGenerator};
use charla_core::history::{expiry_epoch, HistoryRecord, HistoryStore};
use charla_core::intent::{IntentClassifier, IntentState, Recognition};
use charla_core::language::{DetectedLanguage, Language, LanguageDetector};
use charla_core::message::{localized, MessageKey};
use charla_core::sentiment::{Sentiment, SentimentAnalyzer, SentimentResult, SentimentScores};
use charla_core::translate::Translator;
use charla_core::turn::{ResponseKind, TurnRequest};
use charla_infrastructure::{InMemoryAnalyticsSink, InMemoryHistoryStore};
use chrono::{Duration, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

struct StubDetector {
    code: &'static str,
    confidence: f32,
    fail: bool,
    calls: AtomicUsize,
}

impl StubDetector {
    fn detecting(code: &'static str) -> Arc<Self> {
        Arc::new(Self {
            code,
            confidence: 0.95,
            fail: false,
            calls: AtomicUsize::new(0),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            code: "es",
            confidence: 0.0,
            fail: true,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait::async_trait]
impl LanguageDetector for StubDetector {
    async fn detect_language(&self, _text: &str) -> Result<DetectedLanguage> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(CharlaError::adapter("text-analytics", "unreachable"));
        }
        Ok(DetectedLanguage {
            code: self.code.to_string(),
            confidence: self.confidence,
        })
    }
}

/// Marks translations so tests can see which direction ran.
struct MarkingTranslator {
    calls: AtomicUsize,
}

impl MarkingTranslator {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait::async_trait]
impl Translator for MarkingTranslator {
    async fn translate(&self, text: &str, source: Language, target: Language) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("[{source}->{target}] {text}"))
    }
}

struct StubClassifier {
    intent_name: &'static str,
    fail: bool,
    last_text: Mutex<Option<String>>,
}

impl StubClassifier {
    fn recognizing(intent_name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            intent_name,
            fail: false,
            last_text: Mutex::new(None),
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            intent_name: "",
            fail: true,
            last_text: Mutex::new(None),
        })
    }
}

#[async_trait::async_trait]
impl IntentClassifier for StubClassifier {
    async fn classify(
        &self,
        text: &str,
        _language: Language,
        _session_id: &str,
    ) -> Result<Recognition> {
        *self.last_text.lock().unwrap() = Some(text.to_string());
        if self.fail {
            return Err(CharlaError::adapter("nlu", "unreachable"));
        }
        Ok(Recognition {
            intent_name: self.intent_name.to_string(),
            state: IntentState::Fulfilled,
            slots: HashMap::new(),
            messages: Vec::new(),
        })
    }
}

struct StubSentiment {
    sentiment: Sentiment,
    fail: bool,
}

impl StubSentiment {
    fn scoring(sentiment: Sentiment) -> Arc<Self> {
        Arc::new(Self {
            sentiment,
            fail: false,
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            sentiment: Sentiment::Neutral,
            fail: true,
        })
    }
}

#[async_trait::async_trait]
impl SentimentAnalyzer for StubSentiment {
    async fn detect_sentiment(&self, _text: &str, _language: Language) -> Result<SentimentResult> {
        if self.fail {
            return Err(CharlaError::adapter("text-analytics", "unreachable"));
        }
        Ok(SentimentResult {
            sentiment: self.sentiment,
            scores: SentimentScores {
                positive: 0.9,
                negative: 0.02,
                neutral: 0.06,
                mixed: 0.02,
            },
        })
    }
}

struct StubGenerator {
    completion: Option<RawCompletion>,
    last_context: Mutex<Option<String>>,
}

impl StubGenerator {
    fn completing(completion: RawCompletion) -> Arc<Self> {
        Arc::new(Self {
            completion: Some(completion),
            last_context: Mutex::new(None),
        })
    }

    fn unreachable() -> Arc<Self> {
        Arc::new(Self {
            completion: None,
            last_context: Mutex::new(None),
        })
    }
}

#[async_trait::async_trait]
impl ReplyGenerator for StubGenerator {
    async fn generate(&self, _prompt: &str, context: &str) -> Result<RawCompletion> {
        *self.last_context.lock().unwrap() = Some(context.to_string());
        self.completion
            .clone()
            .ok_or_else(|| CharlaError::adapter("generation", "unreachable"))
    }
}

struct FailingHistoryStore;

#[async_trait::async_trait]
impl HistoryStore for FailingHistoryStore {
    async fn fetch_recent(&self, _session_id: &str, _limit: usize) -> Result<Vec<HistoryRecord>> {
        Err(CharlaError::data_access("store down"))
    }

    async fn persist(&self, _record: &HistoryRecord) -> Result<()> {
        Err(CharlaError::data_access("store down"))
    }
}

struct Fixture {
    detector: Arc<StubDetector>,
    translator: Arc<MarkingTranslator>,
    classifier: Arc<StubClassifier>,
    sentiment: Arc<StubSentiment>,
    generator: Arc<StubGenerator>,
    store: Arc<InMemoryHistoryStore>,
    analytics: Arc<InMemoryAnalyticsSink>,
}

impl Fixture {
    fn new() -> Self {
        Self {
            detector: StubDetector::detecting("es"),
            translator: MarkingTranslator::new(),
            classifier: StubClassifier::recognizing("ShippingQueryIntent"),
            sentiment: StubSentiment::scoring(Sentiment::Positive),
            generator: StubGenerator::completing(RawCompletion::from_content(
                "El envío estándar tarda de 3 a 5 días.",
            )),
            store: Arc::new(InMemoryHistoryStore::new()),
            analytics: Arc::new(InMemoryAnalyticsSink::new()),
        }
    }

    fn orchestrator(&self) -> TurnOrchestrator {
        TurnOrchestrator::new(
            &ChatbotConfig::default(),
            self.detector.clone(),
            self.translator.clone(),
            self.classifier.clone(),
            self.sentiment.clone(),
            self.generator.clone(),
            self.store.clone(),
            self.analytics.clone(),
        )
    }
}

fn request(message: &str, language: Option<&str>) -> TurnRequest {
    TurnRequest {
        session_id: "session-1".to_string(),
        user_id: "user-1".to_string(),
        message_text: message.to_string(),
        language: language.map(str::to_string),
    }
}

#[tokio::test]
async fn test_spanish_shipping_turn_end_to_end() {
    let fixture = Fixture::new();
    let orchestrator = fixture.orchestrator();

    let response = orchestrator
        .handle_turn(request("cuanto cuesta el envio", Some("es")))
        .await;

    assert_eq!(response.kind, ResponseKind::Message);
    assert_eq!(response.intent, "ShippingQueryIntent");
    assert_eq!(response.language, Language::Es);
    assert_eq!(response.sentiment, Sentiment::Positive);
    assert!(!response.message.is_empty());

    // Explicit language: no detection call; Spanish turn: no bridging.
    assert_eq!(fixture.detector.calls.load(Ordering::SeqCst), 0);
    assert_eq!(fixture.translator.calls.load(Ordering::SeqCst), 0);

    // Turn persisted and analytics emitted.
    assert_eq!(fixture.store.len("session-1").await, 1);
    let events = fixture.analytics.events().await;
    assert_eq!(events.len(), 1);
    assert_eq!(
        events[0].metadata.get("intent").unwrap(),
        "ShippingQueryIntent"
    );
}

#[tokio::test]
async fn test_generator_unreachable_returns_canned_farewell() {
    let mut fixture = Fixture::new();
    fixture.generator = StubGenerator::unreachable();
    let orchestrator = fixture.orchestrator();

    let response = orchestrator
        .handle_turn(request("muchas gracias por todo", Some("es")))
        .await;

    assert_eq!(response.kind, ResponseKind::Message);
    assert_eq!(
        response.message,
        localized(Language::Es, MessageKey::CannedFarewell)
    );
    // The turn still persists.
    assert_eq!(fixture.store.len("session-1").await, 1);
}

#[tokio::test]
async fn test_sentiment_failure_degrades_to_neutral() {
    let mut fixture = Fixture::new();
    fixture.sentiment = StubSentiment::failing();
    let orchestrator = fixture.orchestrator();

    let response = orchestrator
        .handle_turn(request("cuanto cuesta el envio", Some("es")))
        .await;

    assert_eq!(response.kind, ResponseKind::Message);
    assert_eq!(response.sentiment, Sentiment::Neutral);
}

#[tokio::test]
async fn test_classifier_failure_degrades_to_fallback_intent() {
    let mut fixture = Fixture::new();
    fixture.classifier = StubClassifier::failing();
    let orchestrator = fixture.orchestrator();

    let response = orchestrator
        .handle_turn(request("no entiendo nada", Some("es")))
        .await;

    assert_eq!(response.kind, ResponseKind::Message);
    assert_eq!(response.intent, "FallbackIntent");
    assert!(!response.message.is_empty());
}

#[tokio::test]
async fn test_empty_message_short_circuits() {
    let fixture = Fixture::new();
    let orchestrator = fixture.orchestrator();

    let response = orchestrator.handle_turn(request("   ", Some("en"))).await;

    assert_eq!(response.kind, ResponseKind::Error);
    assert_eq!(
        response.message,
        localized(Language::En, MessageKey::EmptyMessage)
    );
    // Nothing ran: no classification, no persistence.
    assert!(fixture.classifier.last_text.lock().unwrap().is_none());
    assert_eq!(fixture.store.len("session-1").await, 0);
}

#[tokio::test]
async fn test_history_reaches_generator_oldest_first() {
    let fixture = Fixture::new();

    // Seed three turns, newest last.
    let base = Utc::now() - Duration::minutes(10);
    for (offset, text) in ["hola", "precio del envio", "gracias"].iter().enumerate() {
        let created_at = base + Duration::minutes(offset as i64);
        fixture
            .store
            .persist(&HistoryRecord {
                session_id: "session-1".to_string(),
                user_id: "user-1".to_string(),
                user_message: text.to_string(),
                bot_reply: format!("re {offset}"),
                sentiment: Sentiment::Neutral,
                language: Language::Es,
                intent_name: "GreetingIntent".to_string(),
                created_at,
                expires_at: expiry_epoch(created_at, 3600),
            })
            .await
            .unwrap();
    }

    let orchestrator = fixture.orchestrator();
    orchestrator
        .handle_turn(request("y las devoluciones?", Some("es")))
        .await;

    let context = fixture
        .generator
        .last_context
        .lock()
        .unwrap()
        .clone()
        .expect("generator was not called");

    let hola = context.find("User: hola").expect("oldest turn missing");
    let precio = context
        .find("User: precio del envio")
        .expect("middle turn missing");
    let gracias = context.find("User: gracias").expect("newest turn missing");
    assert!(hola < precio && precio < gracias, "history out of order");
}

#[tokio::test]
async fn test_english_turn_bridges_in_and_out() {
    let mut fixture = Fixture::new();
    fixture.detector = StubDetector::detecting("en");
    let orchestrator = fixture.orchestrator();

    let response = orchestrator
        .handle_turn(request("how much is shipping", None))
        .await;

    assert_eq!(response.language, Language::En);
    assert_eq!(fixture.detector.calls.load(Ordering::SeqCst), 1);
    // Inbound en->es and outbound es->en.
    assert_eq!(fixture.translator.calls.load(Ordering::SeqCst), 2);

    let classified = fixture.classifier.last_text.lock().unwrap().clone().unwrap();
    assert_eq!(classified, "[en->es] how much is shipping");
    assert!(response.message.starts_with("[es->en] "));
}

#[tokio::test]
async fn test_store_failure_still_returns_reply() {
    let fixture = Fixture::new();
    let orchestrator = TurnOrchestrator::new(
        &ChatbotConfig::default(),
        fixture.detector.clone(),
        fixture.translator.clone(),
        fixture.classifier.clone(),
        fixture.sentiment.clone(),
        fixture.generator.clone(),
        Arc::new(FailingHistoryStore),
        fixture.analytics.clone(),
    );

    let response = orchestrator
        .handle_turn(request("cuanto cuesta el envio", Some("es")))
        .await;

    // Fetch failed (empty history) and persist failed, but the reply
    // was computed and returned, and analytics still went out.
    assert_eq!(response.kind, ResponseKind::Message);
    assert!(!response.message.is_empty());
    assert_eq!(fixture.analytics.events().await.len(), 1);
}

#[tokio::test]
async fn test_detection_failure_defaults_to_spanish() {
    let mut fixture = Fixture::new();
    fixture.detector = StubDetector::failing();
    let orchestrator = fixture.orchestrator();

    let response = orchestrator.handle_turn(request("hola", None)).await;

    assert_eq!(response.kind, ResponseKind::Message);
    assert_eq!(response.language, Language::Es);
}

#[tokio::test]
async fn test_unsupported_detection_remaps_to_default() {
    let mut fixture = Fixture::new();
    fixture.detector = StubDetector::detecting("fr");
    let orchestrator = fixture.orchestrator();

    let response = orchestrator.handle_turn(request("bonjour", None)).await;

    assert_eq!(response.language, Language::Es);
    // Remapped to the pivot, so no bridging happens.
    assert_eq!(fixture.translator.calls.load(Ordering::SeqCst), 0);
}
