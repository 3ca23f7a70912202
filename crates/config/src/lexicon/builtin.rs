//! Built-in lexicon tables
//!
//! Order is priority: the first key whose variant matches wins. Multi-word
//! keys that contain a shorter key's variant (`black gram` vs `gram`,
//! `shimla mirch` vs `mirch`, `kanpur dehat` vs `kanpur`) are listed first.

use krishi_core::Intent;

pub(super) type Table = &'static [(&'static str, &'static [&'static str])];

pub(super) const CROPS: Table = &[
    ("wheat", &["wheat", "gehun", "गेहूं", "गेहूँ", "sonalika", "lokwan"]),
    (
        "paddy",
        &[
            "paddy",
            "dhan",
            "धान",
            "paddy(dhan)(common)",
            "paddy(dhan)(basmati)",
        ],
    ),
    ("rice", &["rice", "chawal", "chaval", "चावल"]),
    ("tomato", &["tomato", "tomatoes", "tamatar", "टमाटर"]),
    ("potato", &["potato", "potatoes", "aloo", "aalu", "आलू", "आलु"]),
    (
        "tur",
        &[
            "tur",
            "arhar",
            "red gram",
            "अरहर",
            "तूर",
            "arhar (tur/red gram)(whole)",
            "arhar dal(tur dal)",
        ],
    ),
    (
        "urd",
        &[
            "urd",
            "black gram",
            "urad",
            "उड़द",
            "काला चना",
            "black gram (urd beans)(whole)",
            "black gram dal (urd dal)",
        ],
    ),
    (
        "moong",
        &["moong", "green gram", "मूंग", "green gram (moong)(whole)"],
    ),
    (
        "gram",
        &[
            "gram",
            "chana",
            "bengal gram",
            "चना",
            "चना दाल",
            "bengal gram(gram)(whole)",
            "kabuli chana(chickpeas-white)",
            "bengal gram dal (chana dal)",
        ],
    ),
    (
        "millet",
        &[
            "millet",
            "navane",
            "foxtail millet",
            "बाजरा",
            "मिलेट",
            "bajra(pearl millet/cumbu)",
        ],
    ),
    ("jaggery", &["jaggery", "gur", "गुड़", "जैगरी", "gur(jaggery)"]),
    (
        "cucumber",
        &["cucumber", "cucumbers", "kheera", "cucumbar", "खीरा", "ककड़ी", "cucumbar(kheera)"],
    ),
    (
        "capsicum",
        &["capsicum", "shimla mirch", "शिमला मिर्च", "chilly capsicum"],
    ),
    (
        "pepper",
        &["black pepper", "pepper ungarbled", "kali mirch", "काली मिर्च"],
    ),
    (
        "chilli",
        &["chilli", "chillies", "mirchi", "green chilli", "मिर्च", "हरी मिर्च", "dry chillies"],
    ),
    ("sweet lime", &["mousambi(sweet lime)", "mosambi", "मौसम्बी", "sweet lime"]),
    ("lemon", &["lemon", "lemons", "nimbu", "नींबू", "लेमन", "lime"]),
    ("pumpkin", &["pumpkin", "pumpkins", "kaddu", "कद्दू", "पम्पकिन"]),
    ("maize", &["maize", "makka", "मक्का", "corn", "मकई"]),
    ("sugarcane", &["sugarcane", "ganna", "गन्ना"]),
    ("onion", &["onion", "onions", "pyaaz", "प्याज"]),
    (
        "ginger",
        &["ginger", "adrak", "अदरक", "ginger(green)", "ginger(dry)"],
    ),
    ("garlic", &["garlic", "lahsun", "लहसुन"]),
    ("banana", &["banana", "bananas", "kela", "केला", "banana - green"]),
    ("apple", &["apple", "apples", "seb", "सेब"]),
    ("cabbage", &["cabbage", "patta gobhi", "पत्ता गोभी"]),
    ("cauliflower", &["cauliflower", "phool gobhi", "फूल गोभी"]),
    ("brinjal", &["brinjal", "baingan", "बैंगन", "eggplant"]),
    (
        "bhindi",
        &["bhindi", "ladies finger", "okra", "भिंडी", "bhindi(ladies finger)"],
    ),
    ("carrot", &["carrot", "gajar", "गाजर"]),
    ("soyabean", &["soyabean", "soyabeen", "सोयाबीन"]),
    ("mustard", &["mustard", "sarson", "सरसों", "mustard oil"]),
    ("sesame", &["sesame", "til", "तिल", "sesamum(sesame,gingelly,til)"]),
    ("cumin", &["cumin", "jeera", "जीरा", "cummin seed(jeera)"]),
    ("castor seed", &["castor seed"]),
    ("cotton", &["cotton", "kapas", "कपास"]),
    (
        "groundnut",
        &[
            "groundnut",
            "moongphali",
            "मूंगफली",
            "ground nut seed",
            "groundnut pods (raw)",
        ],
    ),
    ("jowar", &["jowar", "sorghum", "ज्वार", "jowar(sorghum)"]),
    ("guar", &["guar", "gwar", "ग्वार"]),
    ("ajwan", &["ajwan", "ajwain", "अजवाइन"]),
    (
        "coriander",
        &["coriander", "dhania", "धनिया", "coriander(leaves)", "corriander seed"],
    ),
    ("arecanut", &["arecanut", "supari", "सुपारी", "arecanut(betelnut/supari)"]),
    ("coconut", &["coconut", "nariyal", "नारियल", "copra"]),
    ("papaya", &["papaya", "papita", "पपीता", "papaya (raw)"]),
    (
        "peas",
        &["peas", "matar", "मटर", "green peas", "peas wet", "peas cod", "white peas"],
    ),
    ("guava", &["guava", "amrood", "अमरूद"]),
    ("pomegranate", &["pomegranate", "anar", "अनार"]),
    ("raddish", &["raddish", "radish", "mooli", "मूली"]),
    ("spinach", &["spinach", "palak", "पालक"]),
    ("colacasia", &["colacasia", "arbi", "अरबी"]),
    ("bitter gourd", &["bitter gourd", "karela", "करेला"]),
    ("bottle gourd", &["bottle gourd", "lauki", "लौकी"]),
    ("sponge gourd", &["sponge gourd", "nenua", "नेनुआ"]),
    ("ridgeguard", &["ridgeguard(tori)", "tori", "तोरी"]),
    ("snakeguard", &["snakeguard", "chichinda", "चिचिंडा"]),
    ("parval", &["parval", "परवल", "pointed gourd (parval)"]),
    ("wood", &["wood", "lakdi", "लकड़ी"]),
    ("methi", &["methi", "मेथी", "methi seeds"]),
    ("soanf", &["soanf", "saunf", "सौंफ"]),
    ("drumstick", &["drumstick", "sahjan", "सहजन"]),
    ("pear", &["pear", "nashpati", "नाशपाती", "pear(marasebu)"]),
    ("grapes", &["grapes", "angoor", "अंगूर"]),
    ("orange", &["orange", "santara", "संतरा"]),
    ("pineapple", &["pineapple", "ananas", "अनानास"]),
    ("watermelon", &["watermelon", "water melon", "tarbooj", "तरबूज"]),
    ("tapioca", &["tapioca"]),
    ("rubber", &["rubber"]),
    ("nutmeg", &["nutmeg", "jaiphal", "जायफल"]),
    ("turmeric", &["turmeric", "haldi", "हल्दी"]),
    ("barley", &["barley", "jau", "जौ", "barley (jau)"]),
    ("ghee", &["ghee", "घी"]),
    (
        "lentil",
        &["lentil", "masur dal", "masoor", "मसूर", "lentil (masur)(whole)"],
    ),
    ("linseed", &["linseed", "alsi", "अलसी"]),
];

pub(super) const LOCATIONS: Table = &[
    // States
    ("andhra pradesh", &["andhra pradesh", "andhra", "आंध्र प्रदेश"]),
    ("bihar", &["bihar", "बिहार"]),
    ("chandigarh", &["chandigarh", "चंडीगढ़"]),
    ("chattisgarh", &["chattisgarh", "chhattisgarh", "छत्तीसगढ़"]),
    ("gujarat", &["gujarat", "गुजरात"]),
    ("haryana", &["haryana", "हरियाणा"]),
    ("himachal pradesh", &["himachal pradesh", "हिमाचल प्रदेश"]),
    (
        "jammu and kashmir",
        &["jammu and kashmir", "jammu", "kashmir", "जम्मू और कश्मीर"],
    ),
    ("karnataka", &["karnataka", "कर्नाटक"]),
    ("kerala", &["kerala", "केरल"]),
    ("uttar pradesh", &["uttar pradesh", "उत्तर प्रदेश"]),
    ("delhi", &["delhi", "dilli", "दिल्ली"]),
    // Cities and districts
    ("patna", &["patna", "पटना"]),
    ("pune", &["pune", "पुणे"]),
    ("bangalore", &["bangalore", "bengaluru", "बैंगलोर", "बेंगलुरु"]),
    ("mumbai", &["mumbai", "bombay", "मुंबई"]),
    ("kolkata", &["kolkata", "calcutta", "कोलकाता"]),
    ("chittor", &["chittor", "chittoor", "चित्तूर"]),
    ("krishna", &["krishna", "कृष्णा"]),
    ("kurnool", &["kurnool", "कुर्नूल"]),
    ("nellore", &["nellore", "नेल्लोर"]),
    ("bhojpur", &["bhojpur", "भोजपुर"]),
    ("balodabazar", &["balodabazar", "बालोदाबाजार"]),
    ("bilaspur", &["bilaspur", "बिलासपुर"]),
    ("dhamtari", &["dhamtari", "धमतरी"]),
    ("raigarh", &["raigarh", "रायगढ़"]),
    ("rajnandgaon", &["rajnandgaon", "राजनांदगांव"]),
    ("agra", &["agra", "आगरा"]),
    ("aligarh", &["aligarh", "अलीगढ़"]),
    ("ayodhya", &["ayodhya", "अयोध्या"]),
    ("azamgarh", &["azamgarh", "आजमगढ़"]),
    ("bareilly", &["bareilly", "बरेली"]),
    ("ghaziabad", &["ghaziabad", "गाजियाबाद"]),
    ("gorakhpur", &["gorakhpur", "गोरखपुर"]),
    ("jhansi", &["jhansi", "झांसी"]),
    ("kanpur dehat", &["kanpur dehat", "कानपुर देहात"]),
    ("kanpur", &["kanpur", "कानपुर"]),
    ("lucknow", &["lucknow", "लखनऊ"]),
    ("meerut", &["meerut", "मेरठ"]),
    ("mirzapur", &["mirzapur", "मिर्जापुर"]),
    (
        "prayagraj",
        &["prayagraj", "allahabad", "प्रयागराज", "इलाहाबाद"],
    ),
    ("saharanpur", &["saharanpur", "सहारनपुर"]),
    ("varanasi", &["varanasi", "banaras", "वाराणसी"]),
    ("ahmedabad", &["ahmedabad", "अहमदाबाद"]),
    ("rajkot", &["rajkot", "राजकोट"]),
    ("surat", &["surat", "सूरत"]),
    ("kachchh", &["kachchh", "kutch", "कच्छ"]),
    ("ambala", &["ambala", "अंबाला"]),
    ("gurgaon", &["gurgaon", "gurugram", "गुड़गांव"]),
    ("hissar", &["hissar", "hisar", "हिसार"]),
    ("karnal", &["karnal", "करनाल"]),
    ("panipat", &["panipat", "पानीपत"]),
    ("shimla", &["shimla", "शिमला"]),
    ("kullu", &["kullu", "कुल्लू"]),
    ("mysore", &["mysore", "mysuru", "मैसूर"]),
    ("kolar", &["kolar", "कोलार"]),
    ("ernakulam", &["ernakulam", "एर्नाकुलम"]),
    ("kozhikode", &["kozhikode", "calicut", "कोझिकोड"]),
    (
        "thiruvananthapuram",
        &["thiruvananthapuram", "trivandrum", "तिरुवनंतपुरम"],
    ),
];

pub(super) const VARIETIES: Table = &[
    ("hybrid", &["hybrid", "हाइब्रिड"]),
    ("achhu", &["achhu", "आच्छू"]),
    ("bpt", &["b p t", "bpt", "बीपीटी"]),
    ("sona", &["sona", "सोना"]),
    ("local", &["local", "स्थानीय"]),
    ("jyoti", &["jyoti", "ज्योति"]),
    ("desi", &["desi", "deshi", "देसी"]),
    ("basmati 1509", &["basmati 1509"]),
    ("mtu-1010", &["mtu-1010", "mtu 1010"]),
];

pub(super) const SEASONS: Table = &[
    ("winter", &["winter", "rabi", "रबी", "सर्दियों"]),
    ("summer", &["summer", "zaid", "जायद", "गर्मियों"]),
    ("monsoon", &["monsoon", "kharif", "खरीफ", "बरसात"]),
];

/// Crop key → commodity name used in the mandi price table
pub(super) const COMMODITIES: &[(&str, &str)] = &[
    ("wheat", "Wheat"),
    ("rice", "Rice"),
    ("tomato", "Tomato"),
    ("potato", "Potato"),
    ("paddy", "Paddy(Dhan)(Common)"),
    ("tur", "Arhar (Tur/Red Gram)(Whole)"),
    ("gram", "Bengal Gram(Gram)(Whole)"),
    ("urd", "Black Gram (Urd Beans)(Whole)"),
    ("moong", "Green Gram (Moong)(Whole)"),
    ("millet", "Foxtail Millet(Navane)"),
    ("jaggery", "Gur(Jaggery)"),
    ("wood", "Wood"),
    ("cucumber", "Cucumbar(Kheera)"),
    ("chilli", "Green Chilli"),
    ("lemon", "Lemon"),
    ("pumpkin", "Pumpkin"),
    ("maize", "Maize"),
    ("sugarcane", "Sugarcane"),
];

pub(super) const ENGLISH_KEYWORDS: &[(Intent, &[&str])] = &[
    (Intent::GetPrice, &["price", "cost", "rate", "bhav", "market", "mandi"]),
    (
        Intent::GetWeather,
        &["weather", "rain", "temperature", "forecast", "humidity", "hot", "cold"],
    ),
    (
        Intent::GetAdvice,
        &["disease", "pest", "problem", "advice", "help", "treatment", "solution"],
    ),
    (Intent::Greeting, &["hello", "hi", "hey", "howdy", "thanks", "thank"]),
    (Intent::GetVarietyInfo, &["variety", "type", "seed", "species"]),
    (Intent::GetMarketInfo, &["market", "mandi", "sell", "buy"]),
];

/// Devanagari keywords followed by their common romanized spellings
pub(super) const HINDI_KEYWORDS: &[(Intent, &[&str])] = &[
    (
        Intent::GetPrice,
        &[
            "भाव", "मूल्य", "दर", "कीमत", "लागत", "बाजार", "मंडी", "bhav", "daam", "keemat",
            "mandi",
        ],
    ),
    (
        Intent::GetWeather,
        &[
            "मौसम", "बारिश", "तापमान", "वर्षा", "गर्मी", "सर्दी", "आर्द्रता", "mausam",
            "baarish", "garmi", "sardi",
        ],
    ),
    (
        Intent::GetAdvice,
        &[
            "रोग", "कीट", "समस्या", "सलाह", "उपाय", "जानकारी", "उपचार", "बीमारी", "salah",
            "rog", "keet", "samasya", "upay",
        ],
    ),
    (
        Intent::Greeting,
        &[
            "नमस्ते", "हैलो", "हाय", "कैसे", "धन्यवाद", "शुक्रिया", "namaste", "dhanyavad",
            "shukriya",
        ],
    ),
    (
        Intent::GetVarietyInfo,
        &["किस्म", "प्रजाति", "वैरायटी", "बीज", "kism", "beej"],
    ),
    (
        Intent::GetMarketInfo,
        &["बाजार", "मंडी", "बिक्री", "खरीद", "bazaar", "bikri", "kharid"],
    ),
];

pub(super) const EXIT_PHRASES: &[&str] = &["exit", "quit", "stop", "बंद", "रुको"];

pub(super) const ROMAN_HINDI_WORDS: &[&str] = &[
    "ka", "ki", "ke", "mein", "batao", "kya", "hai", "hain", "chahiye", "bhav", "mausam",
    "salah", "rog", "keet", "samasya", "kichad", "pani", "baarish", "garmi", "sardi",
];
