//! Redis server and MONITOR output patterns.

pub const REDIS: &[(&str, &str)] = &[
    ("REDISTIMESTAMP", r"%{MONTHDAY} %{MONTH} %{TIME}"),
    (
        "REDISLOG",
        r"\[%{POSINT:process.pid:int}\] %{REDISTIMESTAMP:timestamp} \*",
    ),
    (
        "REDISMONLOG",
        r#"%{NUMBER:timestamp} \[%{INT:redis.database.id} %{IPORHOST:client.address}:%{POSINT:client.port:int}\] "%{WORD:redis.command.name}"\s?%{GREEDYDATA:redis.command.args}"#,
    ),
];
