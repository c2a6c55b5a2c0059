//! MongoDB server log patterns.

pub const MONGODB: &[(&str, &str)] = &[
    (
        "MONGO_LOG",
        r"%{SYSLOGTIMESTAMP:timestamp} \[%{WORD:mongodb.component}\] %{GREEDYDATA:message}",
    ),
    ("MONGO_QUERY_CONTENT", r"(.*?)"),
    (
        "MONGO_QUERY",
        r"\{ %{MONGO_QUERY_CONTENT:MONGO_QUERY} \} ntoreturn:",
    ),
    (
        "MONGO_SLOWQUERY",
        r"%{WORD:mongodb.profile.op} %{MONGO_WORDDASH:mongodb.database}\.%{MONGO_WORDDASH:mongodb.collection} %{WORD}: \{ %{MONGO_QUERY_CONTENT:mongodb.query.original} \} ntoreturn:%{NONNEGINT:mongodb.profile.ntoreturn:int} ntoskip:%{NONNEGINT:mongodb.profile.ntoskip:int} nscanned:%{NONNEGINT:mongodb.profile.nscanned:int}.*? nreturned:%{NONNEGINT:mongodb.profile.nreturned:int}.*? %{INT:mongodb.profile.duration:int}ms",
    ),
    ("MONGO_WORDDASH", r"\b[\w-]+\b"),
    ("MONGO3_SEVERITY", r"\w"),
    ("MONGO3_COMPONENT", r"%{WORD}"),
    (
        "MONGO3_LOG",
        r"%{TIMESTAMP_ISO8601:timestamp} %{MONGO3_SEVERITY:log.level} (?:-|%{MONGO3_COMPONENT:mongodb.component})%{SPACE}(?:\[%{DATA:mongodb.context}\])? %{GREEDYDATA:message}",
    ),
];
