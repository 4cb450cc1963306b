use alarm_notifier::configuration::get_configuration;
use alarm_notifier::model::alarm::SnsEnvelope;
use alarm_notifier::notifier;
use alarm_notifier::telemetry::{get_subscriber, init_subscriber};
use dotenv::dotenv;
use lambda_runtime::{LambdaEvent, service_fn};
use tracing_log::log::info;

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    let subscriber = get_subscriber("alarm_notifier".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    info!("알람 노티파이어 시작 중...");

    dotenv().ok();
    // webhook 환경 변수가 없으면 여기서 바로 종료된다
    let settings = get_configuration()?;
    info!("웹훅 설정 로드 완료");

    lambda_runtime::run(service_fn(|event: LambdaEvent<SnsEnvelope>| {
        let webhook_url = settings.webhook_url.clone();
        async move {
            let body = notifier::process_event(&event.payload, &webhook_url).await?;
            Ok::<String, lambda_runtime::Error>(body)
        }
    }))
    .await?;

    Ok(())
}
