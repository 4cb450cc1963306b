use alarm_notifier::sms::{SmsRequest, forward_sms};
use alarm_notifier::telemetry::{get_subscriber, init_subscriber};
use aws_config::{BehaviorVersion, Region};
use lambda_runtime::{LambdaEvent, service_fn};
use tracing_log::log::info;

// ap-northeast-1 도쿄 리전 식별자
const SMS_REGION: &str = "ap-northeast-1";

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    let subscriber = get_subscriber("sms_forwarder".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    info!("SMS 포워더 시작 중...");

    let config = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(SMS_REGION))
        .load()
        .await;
    let client = aws_sdk_sns::Client::new(&config);
    info!("SNS 클라이언트 준비 완료");

    lambda_runtime::run(service_fn(|event: LambdaEvent<SmsRequest>| {
        let client = client.clone();
        async move {
            let result = forward_sms(&client, &event.payload).await?;
            Ok::<String, lambda_runtime::Error>(result)
        }
    }))
    .await?;

    Ok(())
}
