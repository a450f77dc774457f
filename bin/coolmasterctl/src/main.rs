use coolmaster::{Channel, Command, Connection, HvacUnit, TcpConnection};

use std::process;

use log::info;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> Result<()> {
    pretty_env_logger::init();

    let address =
        std::env::var("COOLMASTER_ADDRESS").expect("set ENV variable COOLMASTER_ADDRESS");

    let mut args = std::env::args().skip(1);
    let uid = args.next().unwrap_or_else(|| usage());
    let action = args.next().unwrap_or_else(|| usage());

    let (channel, command) = match action.as_str() {
        "status" => (Channel::Power, Command::Refresh),
        "on" => (Channel::Power, Command::Switch(true)),
        "off" => (Channel::Power, Command::Switch(false)),
        "temp" => {
            let value = args.next().unwrap_or_else(|| usage());
            let value = value.parse().unwrap_or_else(|err| {
                eprintln!("invalid temperature '{}': {}", value, err);
                process::exit(1);
            });

            (Channel::SetTemperature, Command::Decimal(value))
        }
        "mode" => (
            Channel::Mode,
            Command::Symbol(args.next().unwrap_or_else(|| usage())),
        ),
        "fspeed" => (
            Channel::FanSpeed,
            Command::Symbol(args.next().unwrap_or_else(|| usage())),
        ),
        "swing" => (
            Channel::LouvrePosition,
            Command::Symbol(args.next().unwrap_or_else(|| usage())),
        ),
        _ => usage(),
    };

    let connection = TcpConnection::connect(&address).await?;
    info!("connected to {}", address);

    if !connection.is_connected() {
        eprintln!("could not connect to CoolMasterNet controller {}", address);
        process::exit(1);
    }

    let mut unit = HvacUnit::new(uid, connection);

    for update in unit.handle_command(channel, &command).await {
        println!("{}", serde_json::to_string(&update)?);
    }

    Ok(())
}

fn usage() -> ! {
    eprintln!(
        "usage: coolmasterctl <uid> status|on|off|temp <value>|mode <token>|fspeed <token>|swing <token>"
    );
    process::exit(1);
}
